pub mod dimacs;

use std::fmt::{self, Display, Formatter};

/// A propositional variable. Variables are numbered from 1, as in DIMACS.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct Variable(pub usize);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Literal {
    Positive(Variable),
    Negative(Variable),
}

impl Literal {
    pub fn new(variable: Variable, value: bool) -> Self {
        if value {
            Literal::Positive(variable)
        } else {
            Literal::Negative(variable)
        }
    }

    /// Converts a nonzero DIMACS integer into a literal. Returns `None` for 0.
    pub fn from_dimacs(x: i64) -> Option<Self> {
        if x > 0 {
            Some(Literal::Positive(Variable(x as usize)))
        } else if x < 0 {
            Some(Literal::Negative(Variable(x.unsigned_abs() as usize)))
        } else {
            None
        }
    }

    pub fn to_dimacs(&self) -> i64 {
        match self {
            Literal::Positive(v) => v.0 as i64,
            Literal::Negative(v) => -(v.0 as i64),
        }
    }

    pub fn variable(&self) -> Variable {
        match self {
            Literal::Positive(v) => *v,
            Literal::Negative(v) => *v,
        }
    }

    pub fn is_positive(&self) -> bool {
        match self {
            Literal::Positive(_) => true,
            Literal::Negative(_) => false,
        }
    }

    pub fn idx(&self) -> usize {
        self.variable().0
    }

    pub fn negated(&self) -> Self {
        match self {
            Literal::Positive(v) => Literal::Negative(*v),
            Literal::Negative(v) => Literal::Positive(*v),
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(disjuncts: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            literals: disjuncts.into_iter().collect(),
        }
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn contains(&self, literal: &Literal) -> bool {
        self.literals.contains(literal)
    }

    pub fn unit_literal(&self) -> Option<Literal> {
        match self.literals.as_slice() {
            [literal] => Some(*literal),
            _ => None,
        }
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.literals.len() > 1 {
            f.write_str("(")?;
        }
        let mut first_literal = true;
        for literal in &self.literals {
            if first_literal {
                first_literal = false;
            } else {
                f.write_str(" | ")?;
            }
            match literal {
                Literal::Positive(Variable(x)) => write!(f, "{}", x)?,
                Literal::Negative(Variable(x)) => write!(f, "!{}", x)?,
            }
        }
        if self.literals.is_empty() {
            f.write_str("false")?;
        }
        if self.literals.len() > 1 {
            f.write_str(")")?;
        }
        Ok(())
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Formula {
    clauses: Vec<Clause>,
}

impl Formula {
    pub fn new(conjuncts: impl IntoIterator<Item = Clause>) -> Self {
        Self {
            clauses: conjuncts.into_iter().collect(),
        }
    }

    /// Builds a formula from DIMACS-style integer clauses. Zeros are skipped.
    pub fn from_dimacs<C, L>(clauses: C) -> Self
    where
        C: IntoIterator<Item = L>,
        L: IntoIterator<Item = i64>,
    {
        Self::new(
            clauses
                .into_iter()
                .map(|clause| Clause::new(clause.into_iter().filter_map(Literal::from_dimacs))),
        )
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.clauses.iter().flat_map(|clause| clause.literals())
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(|clause| clause.is_empty())
    }

    pub fn max_variable(&self) -> usize {
        self.literals().map(|literal| literal.idx()).max().unwrap_or(0)
    }

    /// Simplifies the formula under `variable = value`: clauses made true are dropped and the
    /// literal made false is removed from the rest. Falsified clauses are left in place as
    /// empty clauses, so callers must check [`Formula::has_empty_clause`] afterwards.
    pub fn assign(&self, variable: Variable, value: bool) -> Formula {
        let satisfied = Literal::new(variable, value);
        let falsified = satisfied.negated();
        let clauses = self
            .clauses
            .iter()
            .filter(|clause| !clause.contains(&satisfied))
            .map(|clause| Clause::new(clause.literals().copied().filter(|l| *l != falsified)))
            .collect();
        Formula { clauses }
    }

    pub(crate) fn into_clauses(self) -> Vec<Clause> {
        self.clauses
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.clauses.is_empty() {
            return f.write_str("true");
        }
        let mut first_clause = true;
        for clause in &self.clauses {
            if first_clause {
                first_clause = false;
            } else {
                f.write_str(" & ")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}

/// A CNF problem: the declared number of variables and the formula over them.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Problem {
    pub num_variables: usize,
    pub formula: Formula,
}

impl Problem {
    pub fn new(num_variables: usize, formula: Formula) -> Self {
        Self { num_variables, formula }
    }

    pub fn from_formula(formula: Formula) -> Self {
        Self {
            num_variables: formula.max_variable(),
            formula,
        }
    }
}

#[cfg(test)]
pub(crate) fn p(x: usize) -> Literal {
    Literal::Positive(Variable(x))
}

#[cfg(test)]
pub(crate) fn n(x: usize) -> Literal {
    Literal::Negative(Variable(x))
}

/// Random problems with up to `MAX_VARS` variables and clauses of 1 to 3 literals. Literals may
/// repeat within a clause, and the empty formula is included.
#[cfg(test)]
pub(crate) fn problem_strategy() -> impl proptest::strategy::Strategy<Value = Problem> {
    use proptest::collection::vec;
    use proptest::prelude::*;

    const MAX_VARS: usize = 8;
    const MAX_CLAUSES: usize = 14;

    (1..=MAX_VARS).prop_flat_map(|num_vars| {
        let literal = (1..=num_vars, any::<bool>()).prop_map(|(x, v)| Literal::new(Variable(x), v));
        vec(vec(literal, 1..=3), 0..=MAX_CLAUSES)
            .prop_map(move |clauses| Problem::new(num_vars, Formula::new(clauses.into_iter().map(Clause::new))))
    })
}
