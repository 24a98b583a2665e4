use super::pure_literal::Occurrences;
use super::{Brancher, SolverStats};
use crate::assignment::Assignment;
use crate::formula::{Clause, Formula, Literal, Variable};
use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClauseState {
    Satisfied,
    /// Not yet satisfied. Counts every unassigned occurrence, so `(2 | 2)` stays at 2.
    Open { unassigned: usize, first: Option<Literal> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Satisfied,
    Conflict,
    Undecided,
}

#[derive(Debug)]
struct Decision {
    variable: Variable,
    value: bool,
    // trail length before the decision was bound
    trail_len: usize,
}

/// DPLL over a single clause database. Clauses are never rewritten; their state is read off
/// the assignment, and every binding goes on the trail so backtracking can undo it.
pub(super) struct TrailSearch {
    clauses: Vec<Clause>,
    num_variables: usize,
    assignment: Assignment,
    trail: Vec<Variable>,
    stats: SolverStats,
}

impl TrailSearch {
    pub(super) fn new(formula: Formula, num_variables: usize) -> Self {
        Self {
            clauses: formula.into_clauses(),
            num_variables,
            assignment: Assignment::new(),
            trail: vec![],
            stats: SolverStats::default(),
        }
    }

    pub(super) fn run(mut self, brancher: &mut dyn Brancher) -> (Option<Assignment>, SolverStats) {
        let mut decisions: Vec<Decision> = vec![];
        loop {
            let status = if self.propagate() {
                self.eliminate_pure_literals();
                self.status()
            } else {
                Status::Conflict
            };

            match status {
                Status::Satisfied => return (Some(self.assignment), self.stats),
                Status::Undecided => {
                    let unassigned = self.assignment.unassigned(self.num_variables);
                    let variable = match brancher.pick(&unassigned) {
                        Some(variable) => variable,
                        None => return (Some(self.assignment), self.stats),
                    };
                    self.stats.decisions += 1;
                    trace!("decide {} at trail {}", variable.0, self.trail.len());
                    decisions.push(Decision {
                        variable,
                        value: true,
                        trail_len: self.trail.len(),
                    });
                    self.bind(variable, true);
                }
                Status::Conflict => {
                    self.stats.conflicts += 1;
                    // unwind to the most recent decision whose false branch is still untried
                    loop {
                        let decision = match decisions.pop() {
                            Some(decision) => decision,
                            None => return (None, self.stats),
                        };
                        self.backtrack(decision.trail_len);
                        if decision.value {
                            trace!("decide !{} at trail {}", decision.variable.0, self.trail.len());
                            decisions.push(Decision {
                                value: false,
                                ..decision
                            });
                            self.bind(decision.variable, false);
                            break;
                        }
                    }
                }
            }
        }
    }

    fn clause_state(&self, clause: &Clause) -> ClauseState {
        let mut unassigned = 0;
        let mut first = None;
        for literal in clause.literals() {
            match self.assignment.literal_value(literal) {
                Some(true) => return ClauseState::Satisfied,
                Some(false) => {}
                None => {
                    unassigned += 1;
                    first.get_or_insert(*literal);
                }
            }
        }
        ClauseState::Open { unassigned, first }
    }

    /// Assigns the first unit clause until none is left. Returns false on a falsified clause.
    fn propagate(&mut self) -> bool {
        loop {
            let mut unit = None;
            for clause in &self.clauses {
                match self.clause_state(clause) {
                    ClauseState::Open { unassigned: 0, .. } => return false,
                    ClauseState::Open {
                        unassigned: 1,
                        first: Some(literal),
                    } => {
                        unit.get_or_insert(literal);
                    }
                    _ => {}
                }
            }
            match unit {
                Some(literal) => {
                    trace!("implied {}", literal);
                    self.stats.propagations += 1;
                    self.bind(literal.variable(), literal.is_positive());
                }
                None => return true,
            }
        }
    }

    fn eliminate_pure_literals(&mut self) {
        let mut occurrences = Occurrences::default();
        for clause in &self.clauses {
            if self.clause_state(clause) == ClauseState::Satisfied {
                continue;
            }
            for literal in clause.literals() {
                if self.assignment.get(literal.variable()).is_none() {
                    occurrences.record(literal.variable(), literal.is_positive());
                }
            }
        }

        let pure: Vec<_> = occurrences.pure().collect();
        for (variable, value) in pure {
            trace!("pure {}{}", if value { "" } else { "!" }, variable.0);
            self.stats.pure_literals += 1;
            self.bind(variable, value);
        }
    }

    fn status(&self) -> Status {
        let mut status = Status::Satisfied;
        for clause in &self.clauses {
            match self.clause_state(clause) {
                ClauseState::Satisfied => {}
                ClauseState::Open { unassigned: 0, .. } => return Status::Conflict,
                ClauseState::Open { .. } => status = Status::Undecided,
            }
        }
        status
    }

    fn bind(&mut self, variable: Variable, value: bool) {
        self.assignment.insert(variable, value);
        self.trail.push(variable);
    }

    fn backtrack(&mut self, trail_len: usize) {
        trace!("backtrack: dropping to {} from {}", trail_len, self.trail.len());
        for variable in self.trail.drain(trail_len..) {
            self.assignment.unassign(variable);
        }
    }
}
