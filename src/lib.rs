pub mod assignment;
pub mod formula;
pub mod solver;

#[cfg(test)]
mod brute_force;

use std::io::{self, Write};

#[derive(PartialEq, Clone, Debug)]
pub enum SatResult {
    Satisfiable(Assignment),
    Unsatisfiable,
}

impl SatResult {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, SatResult::Satisfiable(_))
    }

    pub fn model(&self) -> Option<&Assignment> {
        match self {
            SatResult::Satisfiable(model) => Some(model),
            SatResult::Unsatisfiable => None,
        }
    }
}

pub use assignment::Assignment;
pub use formula::dimacs::{DimacsParseError, ParseOptions};
pub use formula::{Clause, Formula, Literal, Problem, Variable};
pub use solver::{dpll, Brancher, BranchingPolicy, Search, Solver, SolverConfig, SolverStats};

/// Writes `SAT` and one `<variable> <value>` line per variable in `1..=num_variables`, or just
/// `UNSAT`. Variables the model leaves unassigned are reported as false.
pub fn write_result(writer: &mut impl Write, result: &SatResult, num_variables: usize) -> io::Result<()> {
    match result {
        SatResult::Satisfiable(model) => {
            writeln!(writer, "SAT")?;
            for x in 1..=num_variables {
                writeln!(writer, "{} {}", x, model.value_or_default(Variable(x)))?;
            }
        }
        SatResult::Unsatisfiable => writeln!(writer, "UNSAT")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brute_force::solve_brute_force;
    use crate::formula::problem_strategy;
    use proptest::prelude::*;
    use test_env_log::test;

    fn solve(num_variables: usize, clauses: Vec<Vec<i64>>) -> SatResult {
        Solver::new(Problem::new(num_variables, Formula::from_dimacs(clauses))).solve()
    }

    #[test]
    fn single_unit() {
        let result = solve(1, vec![vec![1]]);
        assert_eq!(result.model().and_then(|m| m.get(Variable(1))), Some(true));
    }

    #[test]
    fn contradictory_units() {
        assert_eq!(solve(1, vec![vec![1], vec![-1]]), SatResult::Unsatisfiable);
    }

    #[test]
    fn empty_problem() {
        let result = solve(0, vec![]);
        assert!(result.is_satisfiable());
        assert!(result.model().map_or(false, |m| m.is_empty()));
    }

    #[test]
    fn two_clauses() {
        let formula = Formula::from_dimacs(vec![vec![1, -2], vec![2, 3]]);
        let result = Solver::new(Problem::new(3, formula.clone())).solve();
        let model = result.model().expect("satisfiable");
        assert!(model.satisfies(&formula));
    }

    #[test]
    fn empty_clause_unsat() {
        assert_eq!(solve(2, vec![vec![1, 2], vec![]]), SatResult::Unsatisfiable);
    }

    /// `pigeons` pigeons into `holes` holes; variable `i * holes + h + 1` means pigeon i sits in
    /// hole h.
    fn pigeonhole(pigeons: usize, holes: usize) -> Problem {
        let var = |i: usize, h: usize| (i * holes + h + 1) as i64;
        let mut clauses = vec![];
        for i in 0..pigeons {
            clauses.push((0..holes).map(|h| var(i, h)).collect::<Vec<_>>());
        }
        for h in 0..holes {
            for i in 0..pigeons {
                for j in (i + 1)..pigeons {
                    clauses.push(vec![-var(i, h), -var(j, h)]);
                }
            }
        }
        Problem::new(pigeons * holes, Formula::from_dimacs(clauses))
    }

    #[test]
    fn pigeonhole_unsat() {
        for &search in &[Search::Recursive, Search::Iterative, Search::Trail] {
            for &(pigeons, holes) in &[(2, 1), (3, 2), (4, 3)] {
                let config = SolverConfig {
                    search,
                    ..SolverConfig::default()
                };
                let result = Solver::with_config(pigeonhole(pigeons, holes), config).solve();
                assert_eq!(result, SatResult::Unsatisfiable, "{} pigeons, {} holes", pigeons, holes);
            }
        }
    }

    #[test]
    fn pigeonhole_sat() {
        let problem = pigeonhole(3, 3);
        let result = Solver::new(problem.clone()).solve();
        assert!(result.model().map_or(false, |m| m.satisfies(&problem.formula)));
    }

    #[test]
    fn random_branching_is_reproducible() {
        let problem = pigeonhole(4, 4);
        let config = SolverConfig {
            branching: BranchingPolicy::Random { seed: 2021 },
            ..SolverConfig::default()
        };
        let first = Solver::with_config(problem.clone(), config).solve();
        let second = Solver::with_config(problem.clone(), config).solve();
        assert_eq!(first, second);
        assert!(first.model().map_or(false, |m| m.satisfies(&problem.formula)));
    }

    #[test]
    fn write_sat_result() {
        let mut model = Assignment::new();
        model.insert(Variable(1), true);
        model.insert(Variable(3), false);

        let mut out = vec![];
        write_result(&mut out, &SatResult::Satisfiable(model), 3).expect("write");
        assert_eq!(String::from_utf8(out).unwrap(), "SAT\n1 true\n2 false\n3 false\n");

        let mut out = vec![];
        write_result(&mut out, &SatResult::Unsatisfiable, 3).expect("write");
        assert_eq!(String::from_utf8(out).unwrap(), "UNSAT\n");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(512))]

        #[test]
        fn solver_eq_brute_force(problem in problem_strategy(), seed in any::<u64>()) {
            let brute_force = solve_brute_force(&problem);
            let config = SolverConfig {
                branching: BranchingPolicy::Random { seed },
                ..SolverConfig::default()
            };
            let result = Solver::with_config(problem.clone(), config).solve();
            prop_assert_eq!(result.is_satisfiable(), brute_force.is_satisfiable());
            if let Some(model) = result.model() {
                prop_assert!(model.satisfies(&problem.formula));
            }
        }
    }
}
