//! Discretization of the planning horizon into fixed-width time units.

use chrono::{Datelike, Duration, NaiveDateTime, Timelike, Weekday};

use crate::config::{DailyWindow, HorizonConfig};
use crate::error::ScheduleError;

/// One fixed-width slice of the horizon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeUnit {
    /// Zero-based position in the horizon.
    pub index: usize,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub weekday: Weekday,
    /// Inside operating hours and clear of every break.
    pub schedulable: bool,
}

/// The ordered, immutable sequence of units covering a horizon.
///
/// Invariant: unit `i` ends exactly where unit `i + 1` starts, and all units
/// have the same width.
#[derive(Clone, Debug)]
pub struct TimeGrid {
    units: Vec<TimeUnit>,
    unit_minutes: u32,
}

impl TimeGrid {
    /// Partition `[start, end)` into `unit_minutes`-wide units.
    ///
    /// A trailing remainder shorter than one unit is dropped.
    pub fn generate(
        start: NaiveDateTime,
        end: NaiveDateTime,
        unit_minutes: u32,
        operating_window: DailyWindow,
        breaks: &[DailyWindow],
    ) -> Self {
        let width = Duration::minutes(unit_minutes as i64);
        let count = if unit_minutes == 0 || end <= start {
            0
        } else {
            ((end - start).num_minutes() / unit_minutes as i64) as usize
        };

        let units = (0..count)
            .map(|index| {
                let unit_start = start + width * index as i32;
                let from = unit_start.hour() * 60 + unit_start.minute();
                let to = from + unit_minutes;
                let schedulable = operating_window.covers(from, to)
                    && !breaks.iter().any(|brk| brk.overlaps(from, to));
                TimeUnit {
                    index,
                    start: unit_start,
                    end: unit_start + width,
                    weekday: unit_start.weekday(),
                    schedulable,
                }
            })
            .collect();

        Self {
            units,
            unit_minutes,
        }
    }

    /// Validate `horizon` and generate its grid.
    pub fn from_horizon(horizon: &HorizonConfig) -> Result<Self, ScheduleError> {
        horizon.validate()?;
        let grid = Self::generate(
            horizon.horizon_start(),
            horizon.horizon_end(),
            horizon.unit_minutes,
            horizon.operating_window,
            &horizon.breaks,
        );
        if grid.schedulable_count() == 0 {
            return Err(ScheduleError::config(
                "horizon contains no schedulable time unit",
            ));
        }
        Ok(grid)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn units(&self) -> &[TimeUnit] {
        &self.units
    }

    #[inline]
    pub fn unit(&self, index: usize) -> Option<&TimeUnit> {
        self.units.get(index)
    }

    /// Whether the unit at `index` may be occupied. Out-of-range is never schedulable.
    #[inline]
    pub fn schedulable(&self, index: usize) -> bool {
        self.units.get(index).is_some_and(|u| u.schedulable)
    }

    pub fn schedulable_count(&self) -> usize {
        self.units.iter().filter(|u| u.schedulable).count()
    }

    pub fn unit_minutes(&self) -> u32 {
        self.unit_minutes
    }

    pub fn unit_width(&self) -> Duration {
        Duration::minutes(self.unit_minutes as i64)
    }

    /// Weekday of the first unit, if any.
    pub fn first_weekday(&self) -> Option<Weekday> {
        self.units.first().map(|u| u.weekday)
    }

    /// Index of the unit containing `instant`.
    pub fn index_of(&self, instant: NaiveDateTime) -> Option<usize> {
        let first = self.units.first()?;
        if instant < first.start || self.unit_minutes == 0 {
            return None;
        }
        let offset = (instant - first.start).num_minutes() / self.unit_minutes as i64;
        let index = offset as usize;
        (index < self.units.len()).then_some(index)
    }
}
