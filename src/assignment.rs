use crate::formula::{Formula, Literal, Variable};
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Debug, Default)]
pub struct Assignment {
    // Indexed by variable and grown on insert; slot 0 is never used.
    values: Vec<Option<bool>>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Conflict {
    pub variable: Variable,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, variable: Variable) -> Option<bool> {
        self.values.get(variable.0).copied().flatten()
    }

    pub fn literal_value(&self, literal: &Literal) -> Option<bool> {
        self.get(literal.variable()).map(|value| value == literal.is_positive())
    }

    pub fn insert(&mut self, variable: Variable, value: bool) -> Option<bool> {
        if variable.0 >= self.values.len() {
            self.values.resize(variable.0 + 1, None);
        }
        self.values[variable.0].replace(value)
    }

    /// Binds `variable`, failing if it is already bound to the other value.
    pub fn assign(&mut self, variable: Variable, value: bool) -> Result<(), Conflict> {
        match self.get(variable) {
            Some(old) if old != value => Err(Conflict { variable }),
            Some(_) => Ok(()),
            None => {
                self.insert(variable, value);
                Ok(())
            }
        }
    }

    pub fn unassign(&mut self, variable: Variable) {
        if let Some(slot) = self.values.get_mut(variable.0) {
            *slot = None;
        }
    }

    pub fn len(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(x, value)| value.map(|value| (Variable(x), value)))
    }

    pub fn unassigned(&self, num_variables: usize) -> Vec<Variable> {
        (1..=num_variables)
            .map(Variable)
            .filter(|&v| self.get(v).is_none())
            .collect()
    }

    pub fn is_complete(&self, num_variables: usize) -> bool {
        (1..=num_variables).all(|x| self.get(Variable(x)).is_some())
    }

    pub fn value_or_default(&self, variable: Variable) -> bool {
        self.get(variable).unwrap_or(false)
    }

    /// Whether every clause of `formula` has a literal made true by this assignment, reading
    /// unbound variables as false.
    pub fn satisfies(&self, formula: &Formula) -> bool {
        formula.clauses().all(|clause| {
            clause
                .literals()
                .any(|l| self.value_or_default(l.variable()) == l.is_positive())
        })
    }
}

impl PartialEq for Assignment {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for Assignment {}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut first = true;
        for (variable, value) in self.iter() {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "{}", Literal::new(variable, value))?;
        }
        Ok(())
    }
}
