//! End-to-end schedule generation.

use crate::config::{HorizonConfig, SynthesisConfig};
use crate::error::ScheduleError;
use crate::grid::TimeGrid;
use crate::model::{assemble, BinaryProgram};
use crate::models::{Activity, ActivityCatalog, Schedule};
use crate::projection::project;
use crate::solver::Solver;
use crate::{log_detail, log_summary};

/// Everything derived from the inputs before solving.
///
/// Each build owns its own grid, catalog and decisions; builds share nothing.
#[derive(Clone, Debug)]
pub struct Synthesis {
    pub grid: TimeGrid,
    pub catalog: ActivityCatalog,
    pub program: BinaryProgram,
}

/// Build the time grid, the catalog and the binary program.
///
/// Every configuration and enumeration error surfaces here, before any solver call.
pub fn synthesize(
    horizon: &HorizonConfig,
    activities: &[Activity],
    config: &SynthesisConfig,
) -> Result<Synthesis, ScheduleError> {
    let grid = TimeGrid::from_horizon(horizon)?;
    log_summary!(
        config.verbosity,
        "Grid: {} units of {} min, {} schedulable",
        grid.len(),
        grid.unit_minutes(),
        grid.schedulable_count()
    );
    let catalog = ActivityCatalog::new(activities, horizon, config)?;
    let program = assemble(&grid, &catalog, config)?;
    Ok(Synthesis {
        grid,
        catalog,
        program,
    })
}

/// Synthesize, solve with `solver`, verify, and project the result.
pub fn generate_schedule<S: Solver>(
    horizon: &HorizonConfig,
    activities: &[Activity],
    config: &SynthesisConfig,
    solver: &S,
) -> Result<Schedule, ScheduleError> {
    let synthesis = synthesize(horizon, activities, config)?;
    let assignment = solver.solve(&synthesis.program)?;

    // Zero or several starts for an activity surface as InconsistentSolution
    let schedule = project(
        &synthesis.grid,
        &synthesis.catalog,
        &synthesis.program,
        &assignment,
    )?;
    if let Err(violation) = synthesis.program.check(&assignment) {
        return Err(ScheduleError::Solver(format!(
            "returned assignment is invalid: {violation}"
        )));
    }

    log_summary!(config.verbosity, "Scheduled {} activities", schedule.len());
    for scheduled in &schedule.activities {
        log_detail!(
            config.verbosity,
            "  {} ({}): {} - {} on {:?}",
            scheduled.name,
            scheduled.activity_id,
            scheduled.start,
            scheduled.end,
            scheduled.recurrence_days
        );
    }
    Ok(schedule)
}
