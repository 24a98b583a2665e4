use crate::*;

// Exhaustive search, used as an oracle in property tests
#[cfg(test)]
pub(crate) fn solve_brute_force(problem: &Problem) -> SatResult {
    let num_variables = problem.num_variables;
    assert!(num_variables <= 15); // just for safety

    'search: for bits in 0..2u32.pow(num_variables as u32) {
        let mut assignment = Assignment::new();
        for x in 1..=num_variables {
            assignment.insert(Variable(x), bits & (1 << (x - 1)) != 0);
        }
        'clauses: for clause in problem.formula.clauses() {
            for literal in clause.literals() {
                if assignment.literal_value(literal) == Some(true) {
                    // this clause is satisfied, let's go to the next one
                    continue 'clauses;
                }
            }
            // if we got here, this clause was not satisfied, so this assignment is bogus
            continue 'search;
        }
        // if we got here, every clause was satisfied, so we're done and satisfiable
        return SatResult::Satisfiable(assignment);
    }
    // no assignment is valid
    SatResult::Unsatisfiable
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solve_bcp_sat() {
        let problem = Problem::new(2, Formula::from_dimacs(vec![vec![1, 2], vec![-1]]));
        let result = solve_brute_force(&problem);
        assert!(result.model().map_or(false, |m| m.satisfies(&problem.formula)));
    }

    #[test]
    fn solve_bcp_unsat() {
        let problem = Problem::new(2, Formula::from_dimacs(vec![vec![1, 2], vec![-1], vec![-2]]));
        assert_eq!(solve_brute_force(&problem), SatResult::Unsatisfiable);
    }

    #[test]
    fn empty_clause_unsat() {
        let problem = Problem::new(1, Formula::from_dimacs(vec![vec![1], vec![]]));
        assert_eq!(solve_brute_force(&problem), SatResult::Unsatisfiable);
    }

    #[test]
    fn no_variables() {
        let problem = Problem::new(0, Formula::default());
        assert!(solve_brute_force(&problem).is_satisfiable());
    }
}
