pub mod branching;
pub mod propagation;
pub mod pure_literal;
mod trail;

use crate::assignment::Assignment;
use crate::formula::{Formula, Problem, Variable};
use crate::SatResult;
use log::{debug, info, trace};

pub use branching::{Brancher, BranchingPolicy, LowestIndex, RandomChoice};
pub use propagation::unit_propagate;
pub use pure_literal::eliminate_pure_literals;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Search {
    Recursive,
    Iterative,
    /// One clause database and one assignment, undone through a trail on backtrack.
    Trail,
}

impl Default for Search {
    fn default() -> Self {
        Search::Iterative
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct SolverConfig {
    pub search: Search,
    pub branching: BranchingPolicy,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct SolverStats {
    pub decisions: usize,
    pub propagations: usize,
    pub pure_literals: usize,
    pub conflicts: usize,
}

#[derive(Debug)]
enum Node {
    Model(Assignment),
    Conflict,
    Branch(Formula, Assignment, Variable),
}

struct Dpll<'a> {
    num_variables: usize,
    brancher: &'a mut dyn Brancher,
    stats: SolverStats,
}

impl<'a> Dpll<'a> {
    fn new(num_variables: usize, brancher: &'a mut dyn Brancher) -> Self {
        Self {
            num_variables,
            brancher,
            stats: SolverStats::default(),
        }
    }

    fn visit(&mut self, formula: Formula, assignment: Assignment) -> Node {
        let before = assignment.len();
        let (formula, assignment) = match unit_propagate(formula, assignment) {
            Some(result) => result,
            None => {
                self.stats.conflicts += 1;
                return Node::Conflict;
            }
        };
        let propagated = assignment.len();
        self.stats.propagations += propagated - before;

        let (formula, assignment) = eliminate_pure_literals(formula, assignment);
        self.stats.pure_literals += assignment.len() - propagated;

        if formula.is_empty() {
            return Node::Model(assignment);
        }
        if formula.has_empty_clause() {
            self.stats.conflicts += 1;
            return Node::Conflict;
        }

        let unassigned = assignment.unassigned(self.num_variables);
        if unassigned.is_empty() {
            return Node::Model(assignment);
        }
        match self.brancher.pick(&unassigned) {
            Some(variable) => {
                self.stats.decisions += 1;
                Node::Branch(formula, assignment, variable)
            }
            None => Node::Model(assignment),
        }
    }

    fn recurse(&mut self, formula: Formula, assignment: Assignment) -> Option<Assignment> {
        match self.visit(formula, assignment) {
            Node::Model(model) => Some(model),
            Node::Conflict => None,
            Node::Branch(formula, assignment, variable) => {
                for &value in &[true, false] {
                    trace!("decide {}{}", if value { "" } else { "!" }, variable.0);
                    let (f, a) = child(&formula, &assignment, variable, value);
                    if let Some(model) = self.recurse(f, a) {
                        return Some(model);
                    }
                }
                None
            }
        }
    }

    fn iterate(&mut self, formula: Formula, assignment: Assignment) -> Option<Assignment> {
        let mut pending = vec![(formula, assignment)];
        while let Some((formula, assignment)) = pending.pop() {
            match self.visit(formula, assignment) {
                Node::Model(model) => return Some(model),
                Node::Conflict => trace!("backtrack, {} nodes pending", pending.len()),
                Node::Branch(formula, assignment, variable) => {
                    trace!("decide {}", variable.0);
                    // pushed last so the true branch is explored first
                    pending.push(child(&formula, &assignment, variable, false));
                    pending.push(child(&formula, &assignment, variable, true));
                }
            }
        }
        None
    }
}

fn child(formula: &Formula, assignment: &Assignment, variable: Variable, value: bool) -> (Formula, Assignment) {
    let mut assignment = assignment.clone();
    assignment.insert(variable, value);
    (formula.assign(variable, value), assignment)
}

/// Recursive DPLL over `formula` starting from `assignment`. Returns a model, or `None` if no
/// extension of `assignment` satisfies the formula.
pub fn dpll(
    formula: Formula,
    assignment: Assignment,
    num_variables: usize,
    brancher: &mut dyn Brancher,
) -> Option<Assignment> {
    Dpll::new(num_variables, brancher).recurse(formula, assignment)
}

pub struct Solver {
    problem: Problem,
    search: Search,
    brancher: Box<dyn Brancher>,
    stats: SolverStats,
}

impl Solver {
    pub fn new(problem: Problem) -> Self {
        Self::with_config(problem, SolverConfig::default())
    }

    pub fn with_config(problem: Problem, config: SolverConfig) -> Self {
        Self::with_brancher(problem, config.search, config.branching.brancher())
    }

    pub fn with_brancher(problem: Problem, search: Search, brancher: impl Brancher + 'static) -> Self {
        Self {
            problem,
            search,
            brancher: Box::new(brancher),
            stats: SolverStats::default(),
        }
    }

    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    pub fn solve(&mut self) -> SatResult {
        let declared = self.problem.num_variables;
        let num_variables = declared.max(self.problem.formula.max_variable());
        if num_variables > declared {
            debug!("formula mentions variable {} but only {} declared", num_variables, declared);
        }
        debug!(
            "solving {} clauses over {} variables with {:?} search",
            self.problem.formula.num_clauses(),
            num_variables,
            self.search
        );

        let formula = self.problem.formula.clone();
        let assignment = Assignment::new();
        let brancher = &mut *self.brancher;
        let (model, stats) = match self.search {
            Search::Recursive => {
                let mut dpll = Dpll::new(num_variables, brancher);
                let model = dpll.recurse(formula, assignment);
                (model, dpll.stats)
            }
            Search::Iterative => {
                let mut dpll = Dpll::new(num_variables, brancher);
                let model = dpll.iterate(formula, assignment);
                (model, dpll.stats)
            }
            Search::Trail => trail::TrailSearch::new(formula, num_variables).run(brancher),
        };
        self.stats = stats;

        info!(
            "{} decisions, {} propagations, {} pure literals, {} conflicts",
            stats.decisions, stats.propagations, stats.pure_literals, stats.conflicts
        );
        match model {
            Some(model) => SatResult::Satisfiable(model),
            None => SatResult::Unsatisfiable,
        }
    }
}
