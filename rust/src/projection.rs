//! Projection of a solved assignment back onto the calendar.

use chrono::Datelike;

use crate::error::ScheduleError;
use crate::grid::TimeGrid;
use crate::model::{Assignment, BinaryProgram};
use crate::models::{ActivityCatalog, Schedule, ScheduledActivity};

/// Turn the single selected start of every activity into calendar times.
///
/// Fails with `InconsistentSolution` when an activity has zero or several
/// selected starts; the assignment is never repaired.
pub fn project(
    grid: &TimeGrid,
    catalog: &ActivityCatalog,
    program: &BinaryProgram,
    assignment: &Assignment,
) -> Result<Schedule, ScheduleError> {
    let space = program.decisions();
    let width = grid.unit_width();
    let mut activities = Vec::with_capacity(catalog.len());

    for (position, entry) in catalog.entries().iter().enumerate() {
        let mut selected = (0..space.units())
            .filter(|&unit| assignment.value(space.index(position, unit)));
        let (Some(unit), None) = (selected.next(), selected.next()) else {
            let count = (0..space.units())
                .filter(|&unit| assignment.value(space.index(position, unit)))
                .count();
            return Err(ScheduleError::InconsistentSolution {
                activity_id: entry.id,
                selected: count,
            });
        };

        let Some(first) = grid.unit(unit) else {
            return Err(ScheduleError::InconsistentSolution {
                activity_id: entry.id,
                selected: 1,
            });
        };

        // Offsets stay within the horizon: synthesis rejects footprints longer than it
        let duration = width * entry.units_needed as i32;
        let occurrences: Vec<_> = (0..entry.repetitions)
            .map(|i| {
                let start = first.start + width * (i * entry.gap_units) as i32;
                (start, start + duration)
            })
            .collect();

        let mut recurrence_days: Vec<_> = occurrences.iter().map(|(s, _)| s.weekday()).collect();
        recurrence_days.sort_by_key(|d| d.num_days_from_monday());
        recurrence_days.dedup();

        activities.push(ScheduledActivity {
            activity_id: entry.id,
            name: entry.name.clone(),
            start: first.start,
            end: first.start + duration,
            recurrence_days,
            occurrences,
        });
    }

    Ok(Schedule { activities })
}
