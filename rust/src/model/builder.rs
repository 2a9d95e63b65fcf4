//! Compilation of recurrence groups into linear constraints.

use chrono::Weekday;
use rustc_hash::FxHashSet;

use crate::config::SynthesisConfig;
use crate::error::ScheduleError;
use crate::grid::TimeGrid;
use crate::models::{ActivityCatalog, CatalogEntry};
use crate::recurrence::{self, RecurrenceGroup};
use crate::{log_debug, log_detail, log_summary};

use super::decision::DecisionSpace;
use super::program::{BinaryProgram, ConstraintId, ConstraintKind, LinearConstraint, Scope};

/// Builds the constraint families of one model.
///
/// Families, in emission order:
/// 1. per activity: exactly one start decision is set;
/// 2. per activity: optional weekday anchor (symmetry breaking);
/// 3. per activity: starts that begin no fitting group are fixed to 0;
/// 4. per blocked unit: every representative decision of a group covering it is fixed to 0;
/// 5. per schedulable unit: the live representative decisions covering it sum to at most 1.
pub struct ConstraintBuilder<'a> {
    grid: &'a TimeGrid,
    catalog: &'a ActivityCatalog,
    space: &'a DecisionSpace,
    config: &'a SynthesisConfig,
}

impl<'a> ConstraintBuilder<'a> {
    pub fn new(
        grid: &'a TimeGrid,
        catalog: &'a ActivityCatalog,
        space: &'a DecisionSpace,
        config: &'a SynthesisConfig,
    ) -> Self {
        Self {
            grid,
            catalog,
            space,
            config,
        }
    }

    /// Build every constraint, or fail on the first activity with no viable group.
    pub fn build(&self) -> Result<Vec<LinearConstraint>, ScheduleError> {
        let verbosity = self.config.verbosity;
        let n = self.grid.len();
        let mut constraints = Vec::new();
        // Representative decisions of every group covering each unit
        let mut covering: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut fixed: FxHashSet<usize> = FxHashSet::default();

        for (position, entry) in self.catalog.entries().iter().enumerate() {
            let groups: Vec<RecurrenceGroup> =
                recurrence::enumerate(n, entry.units_needed, entry.gap_units, entry.repetitions)
                    .collect();
            if groups.is_empty() {
                return Err(infeasible(
                    entry,
                    match entry.footprint() {
                        Some(span) => format!(
                            "{} repetitions span {} units but the horizon has {}",
                            entry.repetitions, span, n
                        ),
                        None => format!(
                            "{} repetitions {} units apart do not fit any horizon",
                            entry.repetitions, entry.gap_units
                        ),
                    },
                ));
            }

            let mut starts_group = vec![false; n];
            let mut viable_starts = Vec::new();
            for group in &groups {
                let rep = group.representative();
                starts_group[rep] = true;
                if group.units().all(|u| self.grid.schedulable(u)) {
                    viable_starts.push(rep);
                }
                let rep_index = self.space.index(position, rep);
                for unit in group.units() {
                    covering[unit].push(rep_index);
                }
            }
            if viable_starts.is_empty() {
                return Err(infeasible(
                    entry,
                    format!(
                        "no placement of {} x {} units avoids closed periods",
                        entry.repetitions, entry.units_needed
                    ),
                ));
            }
            log_detail!(
                verbosity,
                "Activity {} ({}): {} groups, {} viable",
                entry.id,
                entry.name,
                groups.len(),
                viable_starts.len()
            );

            let all_starts = (0..n).map(|u| self.space.index(position, u)).collect();
            constraints.push(LinearConstraint::equal(
                ConstraintId {
                    kind: ConstraintKind::ExactlyOneStart,
                    scope: Scope::Activity(entry.id),
                },
                all_starts,
                1,
            ));

            if let Some(anchor) = self.day_anchor(position, entry, &viable_starts) {
                constraints.push(anchor);
            }

            for unit in (0..n).filter(|&u| !starts_group[u] && self.grid.schedulable(u)) {
                let index = self.space.index(position, unit);
                fixed.insert(index);
                constraints.push(self.fixing(ConstraintKind::UnanchoredStart, index));
            }
        }

        for unit in self.grid.units().iter().filter(|u| !u.schedulable) {
            for &rep in &covering[unit.index] {
                if !self.space.is_fixed(rep) && fixed.insert(rep) {
                    constraints.push(self.fixing(ConstraintKind::BlockedStart, rep));
                }
            }
        }

        for unit in self.grid.units().iter().filter(|u| u.schedulable) {
            let live: Vec<usize> = covering[unit.index]
                .iter()
                .copied()
                .filter(|rep| !self.space.is_fixed(*rep) && !fixed.contains(rep))
                .collect();
            if live.is_empty() {
                continue;
            }
            log_debug!(
                verbosity,
                "  Coverage(unit {}): {} live starts",
                unit.index,
                live.len()
            );
            constraints.push(LinearConstraint::at_most(
                ConstraintId {
                    kind: ConstraintKind::Coverage,
                    scope: Scope::Unit(unit.index),
                },
                live,
                1,
            ));
        }

        Ok(constraints)
    }

    /// Weekday anchor for activities repeating 2 or 3 times at the default gap.
    ///
    /// Three repetitions start on the horizon's first weekday; two start within
    /// its first three weekdays. Skipped when no viable start falls on those days.
    fn day_anchor(
        &self,
        position: usize,
        entry: &CatalogEntry,
        viable_starts: &[usize],
    ) -> Option<LinearConstraint> {
        if !self.config.symmetry_breaking || !entry.default_gap {
            return None;
        }
        let first = self.grid.first_weekday()?;
        let anchor_days: Vec<Weekday> = match entry.repetitions {
            3 => vec![first],
            2 => vec![first, first.succ(), first.succ().succ()],
            _ => return None,
        };
        let anchored = |unit: usize| {
            self.grid
                .unit(unit)
                .is_some_and(|u| anchor_days.contains(&u.weekday))
        };

        if !viable_starts.iter().any(|&u| anchored(u)) {
            log_detail!(
                self.config.verbosity,
                "  Activity {}: no viable start on {:?}, anchor skipped",
                entry.id,
                anchor_days
            );
            return None;
        }

        let terms = (0..self.grid.len())
            .filter(|&u| anchored(u))
            .map(|u| self.space.index(position, u))
            .collect();
        Some(LinearConstraint::equal(
            ConstraintId {
                kind: ConstraintKind::DayAnchor,
                scope: Scope::Activity(entry.id),
            },
            terms,
            1,
        ))
    }

    fn fixing(&self, kind: ConstraintKind, index: usize) -> LinearConstraint {
        let scope = match self.space.get(index) {
            Some(d) => Scope::Decision(d.id),
            None => Scope::Unit(index),
        };
        log_debug!(self.config.verbosity, "  {:?} fixed: {:?}", kind, scope);
        LinearConstraint::equal(ConstraintId { kind, scope }, vec![index], 0)
    }
}

fn infeasible(entry: &CatalogEntry, reason: String) -> ScheduleError {
    ScheduleError::InfeasibleActivity {
        activity_id: entry.id,
        name: entry.name.clone(),
        reason,
    }
}

/// Assemble the decision space and all constraints into a solver-ready program.
///
/// No partial program is returned: any activity without a viable group fails the build.
pub fn assemble(
    grid: &TimeGrid,
    catalog: &ActivityCatalog,
    config: &SynthesisConfig,
) -> Result<BinaryProgram, ScheduleError> {
    let space = DecisionSpace::build(grid, catalog);
    let constraints = ConstraintBuilder::new(grid, catalog, &space, config).build()?;
    let program = BinaryProgram::new(space, constraints);
    log_summary!(config.verbosity, "Model: {}", program.stats());
    Ok(program)
}
