//! Rolling-window enumeration of recurrence groups.
//!
//! A recurrence group is one candidate placement of every repetition of an
//! activity: `repetitions` spans of `units_needed` contiguous units whose
//! starts are exactly `gap_units` apart. The group is identified by its first
//! start, whose decision variable stands in for the whole group.

use std::ops::Range;

/// One candidate placement of all repetitions of an activity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecurrenceGroup {
    starts: Vec<usize>,
    units_needed: usize,
}

impl RecurrenceGroup {
    /// Start unit of the first span (the representative decision's unit).
    #[inline]
    pub fn representative(&self) -> usize {
        self.starts[0]
    }

    /// Start unit of every span, ascending.
    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    pub fn spans(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.starts.iter().map(|&s| s..s + self.units_needed)
    }

    /// Every unit covered by the group, ascending.
    pub fn units(&self) -> impl Iterator<Item = usize> + '_ {
        self.spans().flatten()
    }

    pub fn contains(&self, unit: usize) -> bool {
        self.starts
            .iter()
            .any(|&s| unit >= s && unit < s + self.units_needed)
    }
}

/// Enumerate every recurrence group over a sequence of `len` units.
///
/// Groups are yielded in increasing order of their first start. Candidate
/// starts whose last span would run past the end are skipped. Yields nothing
/// when `units_needed` or `repetitions` is zero, or when the footprint does not
/// fit in `usize`.
pub fn enumerate(
    len: usize,
    units_needed: usize,
    gap_units: usize,
    repetitions: usize,
) -> impl Iterator<Item = RecurrenceGroup> {
    let footprint = repetitions
        .checked_sub(1)
        .and_then(|extra| extra.checked_mul(gap_units))
        .and_then(|span| span.checked_add(units_needed));
    let last_start = match footprint {
        Some(f) if units_needed > 0 && f <= len => Some(len - f),
        _ => None,
    };

    last_start.into_iter().flat_map(move |last| {
        (0..=last).map(move |first| RecurrenceGroup {
            starts: (0..repetitions).map(|j| first + j * gap_units).collect(),
            units_needed,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_are_full_and_gap_exact() {
        let groups: Vec<_> = enumerate(100, 4, 24, 2).collect();
        assert!(!groups.is_empty());
        for group in &groups {
            let spans: Vec<_> = group.spans().collect();
            assert_eq!(spans.len(), 2);
            for span in &spans {
                assert_eq!(span.len(), 4);
                assert!(span.end <= 100);
            }
            assert_eq!(spans[1].start - spans[0].start, 24);
        }
    }

    #[test]
    fn test_yields_every_fitting_start_in_order() {
        let groups: Vec<_> = enumerate(100, 4, 24, 2).collect();
        // Last valid start: 100 - (24 + 4) = 72
        assert_eq!(groups.len(), 73);
        for (i, group) in groups.iter().enumerate() {
            assert_eq!(group.representative(), i);
        }
        assert_eq!(groups.last().unwrap().starts(), &[72, 96]);
    }

    #[test]
    fn test_single_repetition() {
        let groups: Vec<_> = enumerate(10, 3, 50, 1).collect();
        assert_eq!(groups.len(), 8);
        assert_eq!(groups[0].starts(), &[0]);
        assert_eq!(groups[7].units().collect::<Vec<_>>(), vec![7, 8, 9]);
    }

    #[test]
    fn test_footprint_larger_than_horizon_yields_nothing() {
        assert_eq!(enumerate(100, 4, 48, 3).count(), 1);
        assert_eq!(enumerate(100, 5, 48, 3).count(), 0);
        assert_eq!(enumerate(3, 4, 0, 1).count(), 0);
        assert_eq!(enumerate(10, 0, 2, 2).count(), 0);
        assert_eq!(enumerate(10, 2, 2, 0).count(), 0);
    }

    #[test]
    fn test_overflowing_footprint_yields_nothing() {
        assert_eq!(enumerate(480, 4, usize::MAX / 2, 3).count(), 0);
        assert_eq!(enumerate(480, 4, usize::MAX, 2).count(), 0);
        assert_eq!(enumerate(usize::MAX, 2, usize::MAX / 2, 3).count(), 0);
    }

    #[test]
    fn test_contains_and_units() {
        let group = enumerate(20, 2, 5, 3).nth(1).unwrap();
        assert_eq!(group.starts(), &[1, 6, 11]);
        assert_eq!(group.units().collect::<Vec<_>>(), vec![1, 2, 6, 7, 11, 12]);
        assert!(group.contains(7));
        assert!(!group.contains(8));
        assert!(!group.contains(0));
    }
}
