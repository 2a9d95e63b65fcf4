//! `good_lp` adapter using the pure-Rust `microlp` backend.

use good_lp::{
    constraint, microlp, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};

use crate::model::{Assignment, BinaryProgram, Domain, Sense};

use super::{SolveError, Solver};

/// Mixed-integer solver over `good_lp`.
///
/// The program carries no objective; this adapter minimizes the start unit
/// index so that, among feasible assignments, the earliest starts win and
/// repeated solves of the same program agree.
#[derive(Clone, Copy, Debug, Default)]
pub struct LpSolver;

impl LpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Solver for LpSolver {
    fn solve(&self, program: &BinaryProgram) -> Result<Assignment, SolveError> {
        let decisions = program.decisions().decisions();
        let mut vars = ProblemVariables::new();
        let columns: Vec<Variable> = decisions
            .iter()
            .map(|d| match d.domain {
                Domain::Binary => vars.add(variable().binary()),
                Domain::FixedZero => vars.add(variable().min(0).max(0)),
            })
            .collect();

        let objective: Expression = columns
            .iter()
            .zip(decisions)
            .map(|(&column, d)| (d.id.unit as f64) * column)
            .sum();

        let mut model = vars.minimise(objective).using(microlp);
        for c in program.constraints() {
            let lhs: Expression = c.terms.iter().map(|&t| columns[t]).sum();
            let rhs = c.rhs as f64;
            model = match c.sense {
                Sense::Eq => model.with(constraint!(lhs == rhs)),
                Sense::Le => model.with(constraint!(lhs <= rhs)),
            };
        }

        match model.solve() {
            Ok(solution) => Ok(Assignment::new(
                columns.iter().map(|&c| solution.value(c) > 0.5).collect(),
            )),
            Err(ResolutionError::Infeasible) => Err(SolveError::Infeasible),
            Err(err) => Err(SolveError::Backend(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DailyWindow, HorizonConfig, SynthesisConfig};
    use crate::grid::TimeGrid;
    use crate::model::assemble;
    use crate::models::{Activity, ActivityCatalog};

    fn make_program(horizon: &HorizonConfig, activities: &[Activity]) -> BinaryProgram {
        let config = SynthesisConfig::default();
        let grid = TimeGrid::from_horizon(horizon).unwrap();
        let catalog = ActivityCatalog::new(activities, horizon, &config).unwrap();
        assemble(&grid, &catalog, &config).unwrap()
    }

    #[test]
    fn test_solution_satisfies_program() {
        let horizon = HorizonConfig::default().with_days(1);
        let program = make_program(
            &horizon,
            &[Activity::new(1, "A", 1.0, 1), Activity::new(2, "B", 2.0, 1)],
        );
        let assignment = LpSolver::new().solve(&program).unwrap();
        assert_eq!(program.check(&assignment), Ok(()));
        assert_eq!(assignment.selected().count(), 2);
    }

    #[test]
    fn test_prefers_earliest_start() {
        let horizon = HorizonConfig::default().with_days(1);
        let program = make_program(&horizon, &[Activity::new(1, "A", 1.0, 1)]);
        let assignment = LpSolver::new().solve(&program).unwrap();
        // 08:00 is unit 32
        assert_eq!(assignment.selected().collect::<Vec<_>>(), vec![32]);
    }

    #[test]
    fn test_reports_infeasible() {
        // A single one-hour opening; two one-hour activities cannot share it
        let horizon = HorizonConfig::default()
            .with_days(1)
            .with_operating_window(DailyWindow::from_hm((8, 0), (9, 0)))
            .with_breaks(vec![]);
        let program = make_program(
            &horizon,
            &[Activity::new(1, "A", 1.0, 1), Activity::new(2, "B", 1.0, 1)],
        );
        assert_eq!(LpSolver::new().solve(&program), Err(SolveError::Infeasible));
    }
}
