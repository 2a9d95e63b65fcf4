//! Configuration types for the horizon and the model synthesizer.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::ScheduleError;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Monday 2024-01-01, the first day of the default horizon.
const REFERENCE_MONDAY: NaiveDate = match NaiveDate::from_ymd_opt(2024, 1, 1) {
    Some(date) => date,
    None => panic!("invalid reference date"),
};

/// A time-of-day range `[start, end)` in minutes since midnight.
///
/// Applies to every day of the horizon (operating hours, breaks).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DailyWindow {
    pub start_minute: u32,
    pub end_minute: u32,
}

impl DailyWindow {
    pub fn new(start_minute: u32, end_minute: u32) -> Self {
        Self {
            start_minute,
            end_minute,
        }
    }

    /// Build a window from `(hour, minute)` pairs.
    pub fn from_hm(start: (u32, u32), end: (u32, u32)) -> Self {
        Self::new(start.0 * 60 + start.1, end.0 * 60 + end.1)
    }

    pub fn from_times(start: NaiveTime, end: NaiveTime) -> Self {
        let minutes = |t: NaiveTime| t.hour() * 60 + t.minute();
        Self::new(minutes(start), minutes(end))
    }

    /// Whether `[from, to)` (minutes since midnight) lies entirely inside the window.
    #[inline]
    pub fn covers(&self, from: u32, to: u32) -> bool {
        from >= self.start_minute && from < self.end_minute && to <= self.end_minute
    }

    /// Whether `[from, to)` shares any instant with the window.
    #[inline]
    pub fn overlaps(&self, from: u32, to: u32) -> bool {
        from < self.end_minute && to > self.start_minute
    }

    fn validate(&self, what: &str) -> Result<(), ScheduleError> {
        if self.start_minute >= self.end_minute || self.end_minute > MINUTES_PER_DAY {
            return Err(ScheduleError::config(format!(
                "{what} window {}..{} must be a non-empty range within one day",
                self.start_minute, self.end_minute
            )));
        }
        Ok(())
    }
}

/// Planning horizon and its weekly operating calendar.
#[derive(Clone, Debug)]
pub struct HorizonConfig {
    /// First day of the horizon; the horizon begins at its midnight.
    pub start: NaiveDate,
    /// Number of whole days covered.
    pub days: u32,
    /// Daily operating hours.
    pub operating_window: DailyWindow,
    /// Daily closed periods inside the operating hours.
    pub breaks: Vec<DailyWindow>,
    /// Width of one time unit in minutes.
    pub unit_minutes: u32,
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            start: REFERENCE_MONDAY,
            days: 5,
            operating_window: DailyWindow::from_hm((8, 0), (17, 0)),
            breaks: vec![DailyWindow::from_hm((11, 30), (13, 0))],
            unit_minutes: 15,
        }
    }
}

impl HorizonConfig {
    /// The default Monday–Friday week containing `date`.
    pub fn week_of(date: NaiveDate) -> Self {
        let monday = date - Duration::days(date.weekday().num_days_from_monday() as i64);
        Self {
            start: monday,
            ..Self::default()
        }
    }

    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    pub fn with_operating_window(mut self, window: DailyWindow) -> Self {
        self.operating_window = window;
        self
    }

    pub fn with_breaks(mut self, breaks: Vec<DailyWindow>) -> Self {
        self.breaks = breaks;
        self
    }

    pub fn with_unit_minutes(mut self, unit_minutes: u32) -> Self {
        self.unit_minutes = unit_minutes;
        self
    }

    /// Absolute start of the horizon.
    pub fn horizon_start(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// Absolute (exclusive) end of the horizon.
    pub fn horizon_end(&self) -> NaiveDateTime {
        self.horizon_start() + Duration::days(self.days as i64)
    }

    pub fn unit_width(&self) -> Duration {
        Duration::minutes(self.unit_minutes as i64)
    }

    pub fn units_per_day(&self) -> usize {
        (MINUTES_PER_DAY / self.unit_minutes.max(1)) as usize
    }

    /// Number of whole units that fit in `days` calendar days.
    pub fn units_for_days(&self, days: u32) -> usize {
        self.units_per_day() * days as usize
    }

    /// Check the horizon before a grid is generated from it.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.unit_minutes == 0 || MINUTES_PER_DAY % self.unit_minutes != 0 {
            return Err(ScheduleError::config(format!(
                "unit width of {} minutes must be positive and divide a day",
                self.unit_minutes
            )));
        }
        if self.days == 0 {
            return Err(ScheduleError::config("horizon must span at least one day"));
        }
        self.operating_window.validate("operating")?;
        for brk in &self.breaks {
            brk.validate("break")?;
        }
        Ok(())
    }
}

/// Configuration for the constraint-model synthesizer.
#[derive(Clone, Debug)]
pub struct SynthesisConfig {
    /// Gap between repetition starts, in days, for activities without an explicit gap.
    pub default_gap_days: u32,
    /// Whether day-anchoring constraints are emitted.
    pub symmetry_breaking: bool,
    /// Verbosity level: 0=silent, 1=summary, 2=detail, 3=debug.
    pub verbosity: u8,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            default_gap_days: 2,
            symmetry_breaking: true,
            verbosity: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn test_default_is_reference_week() {
        let horizon = HorizonConfig::default();
        assert_eq!(horizon.start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(horizon.start.weekday(), Weekday::Mon);
        assert_eq!(horizon.days, 5);
        assert_eq!(horizon.units_per_day(), 96);
        assert_eq!(horizon.units_for_days(2), 192);
        assert!(horizon.validate().is_ok());
    }

    #[test]
    fn test_week_of_snaps_to_monday() {
        let thursday = NaiveDate::from_ymd_opt(2025, 3, 13).unwrap();
        let horizon = HorizonConfig::week_of(thursday);
        assert_eq!(horizon.start, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
    }

    #[test]
    fn test_window_covers_and_overlaps() {
        let open = DailyWindow::from_hm((8, 0), (17, 0));
        assert!(open.covers(8 * 60, 8 * 60 + 15));
        assert!(open.covers(16 * 60 + 45, 17 * 60));
        assert!(!open.covers(7 * 60 + 45, 8 * 60));
        assert!(!open.covers(17 * 60, 17 * 60 + 15));

        let lunch = DailyWindow::from_hm((11, 30), (13, 0));
        assert!(!lunch.overlaps(11 * 60 + 15, 11 * 60 + 30));
        assert!(lunch.overlaps(11 * 60 + 30, 11 * 60 + 45));
        assert!(lunch.overlaps(11 * 60 + 15, 11 * 60 + 45));
        assert!(!lunch.overlaps(13 * 60, 13 * 60 + 15));
    }

    #[test]
    fn test_validate_rejects_bad_unit_width() {
        let horizon = HorizonConfig::default().with_unit_minutes(7);
        assert!(matches!(
            horizon.validate(),
            Err(ScheduleError::Configuration(_))
        ));

        let horizon = HorizonConfig::default().with_unit_minutes(0);
        assert!(horizon.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_window() {
        let horizon =
            HorizonConfig::default().with_operating_window(DailyWindow::from_hm((9, 0), (9, 0)));
        assert!(horizon.validate().is_err());

        let horizon = HorizonConfig::default().with_days(0);
        assert!(horizon.validate().is_err());
    }
}
