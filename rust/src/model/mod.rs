//! Constraint-model synthesis.
//!
//! A model has one binary decision per (activity, time unit) pair meaning
//! "the activity's first occurrence starts here". Each feasible start stands
//! in for a whole recurrence group, so occupancy of every unit is expressed
//! by looking backward from the unit to the starts whose groups cover it,
//! rather than by a variable per occupied unit.

mod builder;
mod decision;
mod program;

pub use builder::{assemble, ConstraintBuilder};
pub use decision::{Decision, DecisionId, DecisionSpace, Domain};
pub use program::{
    Assignment, BinaryProgram, ConstraintId, ConstraintKind, LinearConstraint, ModelStats, Scope,
    Sense, Violation,
};
