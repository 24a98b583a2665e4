use crate::assignment::Assignment;
use crate::formula::{Formula, Variable};
use log::trace;
use std::collections::BTreeMap;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Polarity {
    Positive,
    Negative,
    Mixed,
}

impl Polarity {
    fn of(positive: bool) -> Self {
        if positive {
            Polarity::Positive
        } else {
            Polarity::Negative
        }
    }

    fn merge(self, positive: bool) -> Self {
        if self == Polarity::of(positive) {
            self
        } else {
            Polarity::Mixed
        }
    }

    pub(crate) fn pure_value(self) -> Option<bool> {
        match self {
            Polarity::Positive => Some(true),
            Polarity::Negative => Some(false),
            Polarity::Mixed => None,
        }
    }
}

#[derive(Default, Debug)]
pub(crate) struct Occurrences(BTreeMap<Variable, Polarity>);

impl Occurrences {
    pub(crate) fn record(&mut self, variable: Variable, positive: bool) {
        self.0
            .entry(variable)
            .and_modify(|p| *p = p.merge(positive))
            .or_insert_with(|| Polarity::of(positive));
    }

    pub(crate) fn pure(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        self.0
            .iter()
            .filter_map(|(variable, polarity)| polarity.pure_value().map(|value| (*variable, value)))
    }
}

/// Assigns every variable that occurs in `formula` with only one polarity, in a single pass.
///
/// Variables that only become pure as a result of this pass are left for the next call.
pub fn eliminate_pure_literals(mut formula: Formula, mut assignment: Assignment) -> (Formula, Assignment) {
    let mut occurrences = Occurrences::default();
    for literal in formula.literals() {
        occurrences.record(literal.variable(), literal.is_positive());
    }

    for (variable, value) in occurrences.pure() {
        if assignment.get(variable).is_some() {
            continue;
        }
        trace!("pure {}{}", if value { "" } else { "!" }, variable.0);
        assignment.insert(variable, value);
        formula = formula.assign(variable, value);
    }
    (formula, assignment)
}
