//! Solver boundary.
//!
//! The synthesizer only produces a [`BinaryProgram`]; any backend able to find
//! a feasible 0/1 assignment for it can implement [`Solver`].

mod lp;

use thiserror::Error;

use crate::error::ScheduleError;
use crate::model::{Assignment, BinaryProgram};

pub use lp::LpSolver;

/// Errors reported by a solver backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("program is infeasible")]
    Infeasible,
    #[error("{0}")]
    Backend(String),
}

impl From<SolveError> for ScheduleError {
    fn from(err: SolveError) -> Self {
        match err {
            SolveError::Infeasible => ScheduleError::ModelInfeasible,
            SolveError::Backend(msg) => ScheduleError::Solver(msg),
        }
    }
}

/// A backend that solves binary feasibility programs.
///
/// `solve` blocks until the backend finishes; callers needing a timeout must
/// impose it around the call.
pub trait Solver {
    fn solve(&self, program: &BinaryProgram) -> Result<Assignment, SolveError>;
}
