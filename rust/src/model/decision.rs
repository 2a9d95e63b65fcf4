//! Decision variables: one per (activity, time unit) pair.

use std::fmt;

use crate::grid::TimeGrid;
use crate::models::{ActivityCatalog, ActivityId};

/// Structured decision identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DecisionId {
    pub activity_id: ActivityId,
    pub unit: usize,
}

impl fmt::Display for DecisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "start[{}@{}]", self.activity_id, self.unit)
    }
}

/// Value domain of a decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Domain {
    Binary,
    /// Permanently 0: the unit is blocked and can never be a start.
    FixedZero,
}

/// "This unit starts this activity's first occurrence."
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    pub id: DecisionId,
    pub domain: Domain,
}

/// Every decision of a model build, laid out activity-major.
///
/// The decision for catalog position `p` and unit `u` lives at
/// `p * units + u`; that index is the variable index used by constraints.
#[derive(Clone, Debug)]
pub struct DecisionSpace {
    decisions: Vec<Decision>,
    units: usize,
}

impl DecisionSpace {
    /// Create `|activities| × |units|` decisions, fixing those on blocked units.
    pub fn build(grid: &TimeGrid, catalog: &ActivityCatalog) -> Self {
        let units = grid.len();
        let mut decisions = Vec::with_capacity(catalog.len() * units);
        for entry in catalog.entries() {
            for unit in grid.units() {
                decisions.push(Decision {
                    id: DecisionId {
                        activity_id: entry.id,
                        unit: unit.index,
                    },
                    domain: if unit.schedulable {
                        Domain::Binary
                    } else {
                        Domain::FixedZero
                    },
                });
            }
        }
        Self { decisions, units }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    /// Units per activity.
    #[inline]
    pub fn units(&self) -> usize {
        self.units
    }

    #[inline]
    pub fn index(&self, position: usize, unit: usize) -> usize {
        position * self.units + unit
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Decision> {
        self.decisions.get(index)
    }

    pub fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    /// Decisions of the activity at catalog `position`, in unit order.
    pub fn for_activity(&self, position: usize) -> &[Decision] {
        let from = (position * self.units).min(self.decisions.len());
        let to = (from + self.units).min(self.decisions.len());
        &self.decisions[from..to]
    }

    pub fn is_fixed(&self, index: usize) -> bool {
        self.decisions
            .get(index)
            .is_some_and(|d| d.domain == Domain::FixedZero)
    }

    pub fn fixed_count(&self) -> usize {
        self.decisions
            .iter()
            .filter(|d| d.domain == Domain::FixedZero)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HorizonConfig, SynthesisConfig};
    use crate::models::Activity;

    fn make_space() -> (TimeGrid, DecisionSpace) {
        let horizon = HorizonConfig::default();
        let grid = TimeGrid::from_horizon(&horizon).unwrap();
        let catalog = ActivityCatalog::new(
            &[
                Activity::new(10, "A", 1.0, 2),
                Activity::new(20, "B", 0.5, 1),
            ],
            &horizon,
            &SynthesisConfig::default(),
        )
        .unwrap();
        let space = DecisionSpace::build(&grid, &catalog);
        (grid, space)
    }

    #[test]
    fn test_one_decision_per_pair() {
        let (grid, space) = make_space();
        assert_eq!(space.len(), 2 * grid.len());
        assert_eq!(space.for_activity(1).len(), grid.len());

        let d = space.get(space.index(1, 37)).unwrap();
        assert_eq!(
            d.id,
            DecisionId {
                activity_id: 20,
                unit: 37
            }
        );
    }

    #[test]
    fn test_blocked_units_are_fixed() {
        let (grid, space) = make_space();
        for d in space.decisions() {
            let blocked = !grid.schedulable(d.id.unit);
            assert_eq!(d.domain == Domain::FixedZero, blocked);
        }
        assert_eq!(
            space.fixed_count(),
            2 * (grid.len() - grid.schedulable_count())
        );
    }

    #[test]
    fn test_display() {
        let id = DecisionId {
            activity_id: 4,
            unit: 192,
        };
        assert_eq!(id.to_string(), "start[4@192]");
    }
}
