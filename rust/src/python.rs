//! Python bindings (enabled with the `python` feature).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use pyo3::prelude::*;

use crate::config::{DailyWindow, HorizonConfig, SynthesisConfig};
use crate::models::{Activity, ScheduledActivity};
use crate::solver::LpSolver;

/// Activity to schedule (PyO3 wrapper).
#[pyclass(name = "Activity")]
#[derive(Clone, Debug)]
pub struct PyActivity {
    #[pyo3(get, set)]
    pub id: u32,
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub duration_hours: f64,
    #[pyo3(get, set)]
    pub repetitions: u32,
    #[pyo3(get, set)]
    pub gap_units: Option<usize>,
}

#[pymethods]
impl PyActivity {
    #[new]
    #[pyo3(signature = (id, name, duration_hours, repetitions=1, gap_units=None))]
    fn new(
        id: u32,
        name: String,
        duration_hours: f64,
        repetitions: u32,
        gap_units: Option<usize>,
    ) -> Self {
        Self {
            id,
            name,
            duration_hours,
            repetitions,
            gap_units,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Activity(id={}, name={:?}, duration_hours={}, repetitions={})",
            self.id, self.name, self.duration_hours, self.repetitions
        )
    }
}

impl From<&PyActivity> for Activity {
    fn from(py: &PyActivity) -> Self {
        Self {
            id: py.id,
            name: py.name.clone(),
            duration_hours: py.duration_hours,
            repetitions: py.repetitions,
            gap_units: py.gap_units,
        }
    }
}

/// Planning horizon (PyO3 wrapper). Unset windows fall back to the reference week.
#[pyclass(name = "Horizon")]
#[derive(Clone, Debug)]
pub struct PyHorizon {
    #[pyo3(get, set)]
    pub start: NaiveDate,
    #[pyo3(get, set)]
    pub days: u32,
    #[pyo3(get, set)]
    pub operating_window: Option<(NaiveTime, NaiveTime)>,
    #[pyo3(get, set)]
    pub breaks: Option<Vec<(NaiveTime, NaiveTime)>>,
    #[pyo3(get, set)]
    pub unit_minutes: u32,
}

#[pymethods]
impl PyHorizon {
    #[new]
    #[pyo3(signature = (start, days=5, operating_window=None, breaks=None, unit_minutes=15))]
    fn new(
        start: NaiveDate,
        days: u32,
        operating_window: Option<(NaiveTime, NaiveTime)>,
        breaks: Option<Vec<(NaiveTime, NaiveTime)>>,
        unit_minutes: u32,
    ) -> Self {
        Self {
            start,
            days,
            operating_window,
            breaks,
            unit_minutes,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Horizon(start={}, days={}, unit_minutes={})",
            self.start, self.days, self.unit_minutes
        )
    }
}

impl From<&PyHorizon> for HorizonConfig {
    fn from(py: &PyHorizon) -> Self {
        let defaults = HorizonConfig::default();
        Self {
            start: py.start,
            days: py.days,
            operating_window: py
                .operating_window
                .map(|(open, close)| DailyWindow::from_times(open, close))
                .unwrap_or(defaults.operating_window),
            breaks: py
                .breaks
                .as_ref()
                .map(|b| {
                    b.iter()
                        .map(|&(from, to)| DailyWindow::from_times(from, to))
                        .collect()
                })
                .unwrap_or(defaults.breaks),
            unit_minutes: py.unit_minutes,
        }
    }
}

/// A scheduled activity (PyO3 wrapper).
#[pyclass(name = "ScheduledActivity")]
#[derive(Clone, Debug)]
pub struct PyScheduledActivity {
    #[pyo3(get)]
    pub activity_id: u32,
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub start: NaiveDateTime,
    #[pyo3(get)]
    pub end: NaiveDateTime,
    /// Weekday abbreviations ("Mon", "Wed", ...).
    #[pyo3(get)]
    pub recurrence_days: Vec<String>,
    #[pyo3(get)]
    pub occurrences: Vec<(NaiveDateTime, NaiveDateTime)>,
}

#[pymethods]
impl PyScheduledActivity {
    fn __repr__(&self) -> String {
        format!(
            "ScheduledActivity(name={:?}, start={}, end={}, days={:?})",
            self.name, self.start, self.end, self.recurrence_days
        )
    }
}

impl From<ScheduledActivity> for PyScheduledActivity {
    fn from(s: ScheduledActivity) -> Self {
        Self {
            activity_id: s.activity_id,
            name: s.name,
            start: s.start,
            end: s.end,
            recurrence_days: s.recurrence_days.iter().map(|d| d.to_string()).collect(),
            occurrences: s.occurrences,
        }
    }
}

/// Generate a schedule for `activities` over `horizon`.
///
/// # Raises
/// * ValueError on configuration errors, infeasible activities or an infeasible model
#[pyfunction]
#[pyo3(signature = (horizon, activities, default_gap_days=2, symmetry_breaking=true, verbosity=0))]
fn generate_schedule(
    horizon: PyHorizon,
    activities: Vec<PyActivity>,
    default_gap_days: u32,
    symmetry_breaking: bool,
    verbosity: u8,
) -> PyResult<Vec<PyScheduledActivity>> {
    let horizon = HorizonConfig::from(&horizon);
    let activities: Vec<Activity> = activities.iter().map(Activity::from).collect();
    let config = SynthesisConfig {
        default_gap_days,
        symmetry_breaking,
        verbosity,
    };

    match crate::pipeline::generate_schedule(&horizon, &activities, &config, &LpSolver::new()) {
        Ok(schedule) => Ok(schedule
            .activities
            .into_iter()
            .map(PyScheduledActivity::from)
            .collect()),
        Err(e) => Err(pyo3::exceptions::PyValueError::new_err(e.to_string())),
    }
}

/// The cadence.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyActivity>()?;
    m.add_class::<PyHorizon>()?;
    m.add_class::<PyScheduledActivity>()?;

    m.add_function(wrap_pyfunction!(generate_schedule, m)?)?;

    Ok(())
}
