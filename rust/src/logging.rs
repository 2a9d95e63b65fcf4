//! Logging macros for model synthesis with verbosity level control.
//!
//! Provides zero-cost logging when disabled (verbosity=0).
//! Verbosity levels:
//! - 0: SILENT (errors are returned, never printed)
//! - 1: SUMMARY (grid size, model size, solve outcome)
//! - 2: DETAIL (per-activity group counts, anchors applied or skipped)
//! - 3: DEBUG (individual constraints and fixings)

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_SUMMARY: u8 = 1;
pub const VERBOSITY_DETAIL: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at SUMMARY level (verbosity >= 1).
#[macro_export]
macro_rules! log_summary {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_SUMMARY {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DETAIL level (verbosity >= 2).
///
/// Used for: per-activity enumeration results, symmetry-breaking decisions.
#[macro_export]
macro_rules! log_detail {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DETAIL {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
///
/// Used for: every emitted constraint, every fixed decision.
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn bump(calls: &Cell<u32>) -> u32 {
        calls.set(calls.get() + 1);
        calls.get()
    }

    #[test]
    fn test_arguments_untouched_below_level() {
        let calls = Cell::new(0);
        log_summary!(VERBOSITY_SILENT, "units {}", bump(&calls));
        log_detail!(VERBOSITY_SUMMARY, "groups {}", bump(&calls));
        log_debug!(VERBOSITY_DETAIL, "constraint {}", bump(&calls));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_each_level_enables_the_ones_below() {
        let calls = Cell::new(0);
        log_summary!(VERBOSITY_DETAIL, "units {}", bump(&calls));
        log_detail!(VERBOSITY_DETAIL, "groups {}", bump(&calls));
        log_debug!(VERBOSITY_DETAIL, "constraint {}", bump(&calls));
        assert_eq!(calls.get(), 2);

        log_debug!(VERBOSITY_DEBUG, "constraint {}", bump(&calls));
        assert_eq!(calls.get(), 3);
    }
}
