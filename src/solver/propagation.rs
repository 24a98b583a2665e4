use crate::assignment::Assignment;
use crate::formula::Formula;
use log::trace;

/// Returns `None` on a falsified clause or a unit clause that contradicts `assignment`.
pub fn unit_propagate(mut formula: Formula, mut assignment: Assignment) -> Option<(Formula, Assignment)> {
    loop {
        if formula.has_empty_clause() {
            trace!("propagation: falsified clause");
            return None;
        }

        let unit = formula.clauses().find_map(|clause| clause.unit_literal());
        let literal = match unit {
            Some(literal) => literal,
            None => return Some((formula, assignment)),
        };

        let variable = literal.variable();
        let value = literal.is_positive();
        if let Err(conflict) = assignment.assign(variable, value) {
            trace!("propagation: {} already has the other value", conflict.variable.0);
            return None;
        }
        trace!("implied {}", literal);
        formula = formula.assign(variable, value);
    }
}
