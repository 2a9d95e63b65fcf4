//! Error types shared by every synthesis stage.

use thiserror::Error;

use crate::models::ActivityId;

/// Errors that can occur while building, solving or projecting a schedule.
///
/// Configuration and enumeration problems are detected before the solver is
/// invoked; no partial schedule is ever returned alongside an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    #[error("Activity {activity_id} ({name}) cannot be placed: {reason}")]
    InfeasibleActivity {
        activity_id: ActivityId,
        name: String,
        reason: String,
    },
    #[error("No assignment satisfies all constraints")]
    ModelInfeasible,
    #[error("Solver failure: {0}")]
    Solver(String),
    #[error("Inconsistent solution for activity {activity_id}: {selected} start decisions set")]
    InconsistentSolution {
        activity_id: ActivityId,
        selected: usize,
    },
}

impl ScheduleError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        ScheduleError::Configuration(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_activity() {
        let err = ScheduleError::InfeasibleActivity {
            activity_id: 7,
            name: "Lab".to_string(),
            reason: "no viable recurrence group".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Activity 7 (Lab) cannot be placed: no viable recurrence group"
        );

        let err = ScheduleError::InconsistentSolution {
            activity_id: 3,
            selected: 2,
        };
        assert!(err.to_string().contains("2 start decisions"));
    }
}
