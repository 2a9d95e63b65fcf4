//! Core data types: activities to schedule and the resolved schedule.

use chrono::{NaiveDateTime, Weekday};
use rustc_hash::FxHashMap;

use crate::config::{HorizonConfig, SynthesisConfig};
use crate::error::ScheduleError;
use crate::grid::TimeGrid;

/// Caller-assigned activity identifier.
pub type ActivityId = u32;

/// A recurring activity to be scheduled.
#[derive(Clone, Debug, PartialEq)]
pub struct Activity {
    pub id: ActivityId,
    pub name: String,
    /// Length of one occurrence in hours; must be a whole number of units.
    pub duration_hours: f64,
    /// Occurrences per horizon (>= 1).
    pub repetitions: u32,
    /// Distance between consecutive occurrence starts, in units.
    /// `None` uses the configured default gap.
    pub gap_units: Option<usize>,
}

impl Activity {
    pub fn new(
        id: ActivityId,
        name: impl Into<String>,
        duration_hours: f64,
        repetitions: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            duration_hours,
            repetitions,
            gap_units: None,
        }
    }

    pub fn with_gap_units(mut self, gap_units: usize) -> Self {
        self.gap_units = Some(gap_units);
        self
    }
}

/// An activity with its duration and gap resolved to whole time units.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: ActivityId,
    pub name: String,
    pub units_needed: usize,
    pub repetitions: usize,
    pub gap_units: usize,
    /// Whether the gap is the configured default (day anchors only hold then).
    pub default_gap: bool,
}

impl CatalogEntry {
    /// Units spanned from the first occurrence's start to the last occurrence's end.
    ///
    /// `None` when the span does not fit in `usize`.
    pub fn footprint(&self) -> Option<usize> {
        self.repetitions
            .checked_sub(1)?
            .checked_mul(self.gap_units)?
            .checked_add(self.units_needed)
    }
}

/// The validated list of activities, in input order.
#[derive(Clone, Debug)]
pub struct ActivityCatalog {
    entries: Vec<CatalogEntry>,
    positions: FxHashMap<ActivityId, usize>,
}

impl ActivityCatalog {
    /// Resolve `activities` against the unit width of `horizon`.
    ///
    /// Fails with `Configuration` on an empty catalog, duplicate ids, a duration
    /// that is not a positive multiple of the unit width, zero repetitions,
    /// repetitions that would overlap each other, or an occurrence longer than
    /// the horizon itself.
    pub fn new(
        activities: &[Activity],
        horizon: &HorizonConfig,
        config: &SynthesisConfig,
    ) -> Result<Self, ScheduleError> {
        if activities.is_empty() {
            return Err(ScheduleError::config("activity catalog is empty"));
        }
        horizon.validate()?;

        let unit_minutes = horizon.unit_minutes as f64;
        let horizon_units = horizon.units_for_days(horizon.days);
        let default_gap = horizon.units_for_days(config.default_gap_days);

        let mut entries = Vec::with_capacity(activities.len());
        let mut positions =
            FxHashMap::with_capacity_and_hasher(activities.len(), Default::default());

        for activity in activities {
            if positions.insert(activity.id, entries.len()).is_some() {
                return Err(ScheduleError::config(format!(
                    "duplicate activity id {}",
                    activity.id
                )));
            }

            let units = activity.duration_hours * 60.0 / unit_minutes;
            if !units.is_finite() || units < 1.0 - 1e-9 || (units - units.round()).abs() > 1e-9 {
                return Err(ScheduleError::config(format!(
                    "duration of activity {} ({} h) is not a positive multiple of {} minutes",
                    activity.id, activity.duration_hours, horizon.unit_minutes
                )));
            }
            let units_needed = units.round() as usize;

            if activity.repetitions == 0 {
                return Err(ScheduleError::config(format!(
                    "activity {} must repeat at least once",
                    activity.id
                )));
            }
            let repetitions = activity.repetitions as usize;
            let gap_units = activity.gap_units.unwrap_or(default_gap);

            if repetitions > 1 && gap_units < units_needed {
                return Err(ScheduleError::config(format!(
                    "activity {}: gap of {} units is shorter than its {} unit occurrences",
                    activity.id, gap_units, units_needed
                )));
            }
            if units_needed > horizon_units {
                return Err(ScheduleError::config(format!(
                    "activity {} needs {} units but the horizon has {}",
                    activity.id, units_needed, horizon_units
                )));
            }

            entries.push(CatalogEntry {
                id: activity.id,
                name: activity.name.clone(),
                units_needed,
                repetitions,
                gap_units,
                default_gap: gap_units == default_gap,
            });
        }

        Ok(Self { entries, positions })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dense position of an activity id.
    #[inline]
    pub fn position(&self, id: ActivityId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    pub fn get(&self, id: ActivityId) -> Option<&CatalogEntry> {
        self.position(id).map(|p| &self.entries[p])
    }
}

/// Resolved placement of one activity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledActivity {
    pub activity_id: ActivityId,
    pub name: String,
    /// Start of the first occurrence.
    pub start: NaiveDateTime,
    /// End of the first occurrence.
    pub end: NaiveDateTime,
    /// Weekdays with an occurrence, Monday first.
    pub recurrence_days: Vec<Weekday>,
    /// Every occurrence as `[start, end)`, chronological.
    pub occurrences: Vec<(NaiveDateTime, NaiveDateTime)>,
}

/// The solved schedule, one entry per catalog activity in catalog order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    pub activities: Vec<ScheduledActivity>,
}

impl Schedule {
    pub fn get(&self, id: ActivityId) -> Option<&ScheduledActivity> {
        self.activities.iter().find(|a| a.activity_id == id)
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Every activity occupying each unit of `grid`.
    ///
    /// A valid schedule has at most one occupant per unit and none on blocked units.
    pub fn occupancy(&self, grid: &TimeGrid) -> Vec<Vec<ActivityId>> {
        let mut occupants = vec![Vec::new(); grid.len()];
        for scheduled in &self.activities {
            for &(start, end) in &scheduled.occurrences {
                let Some(first) = grid.index_of(start) else {
                    continue;
                };
                for unit in &grid.units()[first..] {
                    if unit.start >= end {
                        break;
                    }
                    occupants[unit.index].push(scheduled.activity_id);
                }
            }
        }
        occupants
    }
}
