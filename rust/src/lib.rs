//! Constraint-model synthesis for recurring weekly schedules.
//!
//! Given recurring activities (duration, repetitions per horizon, gap between
//! repetitions) and a weekly operating calendar with closed periods, builds a
//! binary feasibility program whose solutions are non-overlapping start times
//! for every occurrence, solves it through a [`Solver`] and projects the
//! result back onto the calendar.
//!
//! Pipeline: [`TimeGrid`] → [`ActivityCatalog`] → [`DecisionSpace`] →
//! recurrence enumeration → [`ConstraintBuilder`] → [`BinaryProgram`] →
//! [`Solver`] → [`project`].

#![cfg_attr(feature = "python", allow(clippy::useless_conversion))]

pub mod logging;

mod config;
mod error;
mod grid;
pub mod model;
mod models;
mod pipeline;
mod projection;
pub mod recurrence;
pub mod solver;

#[cfg(feature = "python")]
mod python;

pub use config::{DailyWindow, HorizonConfig, SynthesisConfig};
pub use error::ScheduleError;
pub use grid::{TimeGrid, TimeUnit};
pub use model::{
    assemble, Assignment, BinaryProgram, ConstraintBuilder, ConstraintId, ConstraintKind,
    DecisionId, DecisionSpace, ModelStats,
};
pub use models::{
    Activity, ActivityCatalog, ActivityId, CatalogEntry, Schedule, ScheduledActivity,
};
pub use pipeline::{generate_schedule, synthesize, Synthesis};
pub use projection::project;
pub use recurrence::RecurrenceGroup;
pub use solver::{LpSolver, SolveError, Solver};
