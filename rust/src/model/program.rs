//! The assembled binary program handed to a solver.

use std::fmt;

use crate::models::ActivityId;

use super::decision::{DecisionId, DecisionSpace, Domain};

/// Constraint family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConstraintKind {
    /// Exactly one start decision per activity.
    ExactlyOneStart,
    /// Symmetry-breaking weekday anchor.
    DayAnchor,
    /// At most one representative decision covers a unit.
    Coverage,
    /// Start whose recurrence group lands on a blocked unit.
    BlockedStart,
    /// Start that begins no recurrence group fitting the horizon.
    UnanchoredStart,
}

/// What a constraint is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    Activity(ActivityId),
    Unit(usize),
    Decision(DecisionId),
}

/// Structured constraint identifier: `(kind, scope)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintId {
    pub kind: ConstraintKind,
    pub scope: Scope,
}

impl fmt::Display for ConstraintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}(", self.kind)?;
        match self.scope {
            Scope::Activity(id) => write!(f, "activity {id})"),
            Scope::Unit(unit) => write!(f, "unit {unit})"),
            Scope::Decision(d) => write!(f, "{d})"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sense {
    Eq,
    Le,
}

/// `Σ x[terms] (= | ≤) rhs`, every coefficient being 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinearConstraint {
    pub id: ConstraintId,
    /// Decision indices into the program's decision space.
    pub terms: Vec<usize>,
    pub sense: Sense,
    pub rhs: i32,
}

impl LinearConstraint {
    pub fn equal(id: ConstraintId, terms: Vec<usize>, rhs: i32) -> Self {
        Self {
            id,
            terms,
            sense: Sense::Eq,
            rhs,
        }
    }

    pub fn at_most(id: ConstraintId, terms: Vec<usize>, rhs: i32) -> Self {
        Self {
            id,
            terms,
            sense: Sense::Le,
            rhs,
        }
    }

    /// Whether the constraint holds when exactly the decisions in `value` are set.
    pub fn holds(&self, value: impl Fn(usize) -> bool) -> bool {
        let lhs = self.terms.iter().filter(|&&t| value(t)).count() as i32;
        match self.sense {
            Sense::Eq => lhs == self.rhs,
            Sense::Le => lhs <= self.rhs,
        }
    }
}

/// A 0/1 value for every decision of a program, indexed like its decision space.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    values: Vec<bool>,
}

impl Assignment {
    pub fn new(values: Vec<bool>) -> Self {
        Self { values }
    }

    #[inline]
    pub fn value(&self, index: usize) -> bool {
        self.values.get(index).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Indices of every decision set to 1.
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, &v)| v.then_some(i))
    }
}

/// First reason an assignment does not satisfy a program.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Violation {
    /// Assignment length differs from the number of decisions.
    Shape { expected: usize, actual: usize },
    /// A fixed decision was set.
    Domain(DecisionId),
    Constraint(ConstraintId),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Shape { expected, actual } => {
                write!(f, "expected {expected} values, got {actual}")
            }
            Violation::Domain(id) => write!(f, "fixed decision {id} is set"),
            Violation::Constraint(id) => write!(f, "constraint {id} is violated"),
        }
    }
}

/// Model size broken down by constraint family.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModelStats {
    pub variables: usize,
    pub fixed_variables: usize,
    pub exactly_one: usize,
    pub day_anchors: usize,
    pub coverage: usize,
    pub blocked_starts: usize,
    pub unanchored_starts: usize,
}

impl ModelStats {
    pub fn constraints(&self) -> usize {
        self.exactly_one
            + self.day_anchors
            + self.coverage
            + self.blocked_starts
            + self.unanchored_starts
    }
}

impl fmt::Display for ModelStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} variables ({} fixed), {} constraints: {} exactly-one, {} anchors, {} coverage, {} blocked, {} unanchored",
            self.variables,
            self.fixed_variables,
            self.constraints(),
            self.exactly_one,
            self.day_anchors,
            self.coverage,
            self.blocked_starts,
            self.unanchored_starts
        )
    }
}

/// Pure feasibility program over binary decisions.
#[derive(Clone, Debug)]
pub struct BinaryProgram {
    decisions: DecisionSpace,
    constraints: Vec<LinearConstraint>,
}

impl BinaryProgram {
    pub fn new(decisions: DecisionSpace, constraints: Vec<LinearConstraint>) -> Self {
        Self {
            decisions,
            constraints,
        }
    }

    pub fn decisions(&self) -> &DecisionSpace {
        &self.decisions
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// Always `None`: any feasible assignment is acceptable.
    pub fn objective(&self) -> Option<&[(usize, f64)]> {
        None
    }

    pub fn stats(&self) -> ModelStats {
        let mut stats = ModelStats {
            variables: self.decisions.len(),
            fixed_variables: self.decisions.fixed_count(),
            ..ModelStats::default()
        };
        for c in &self.constraints {
            match c.id.kind {
                ConstraintKind::ExactlyOneStart => stats.exactly_one += 1,
                ConstraintKind::DayAnchor => stats.day_anchors += 1,
                ConstraintKind::Coverage => stats.coverage += 1,
                ConstraintKind::BlockedStart => stats.blocked_starts += 1,
                ConstraintKind::UnanchoredStart => stats.unanchored_starts += 1,
            }
        }
        stats
    }

    /// Verify `assignment` against every domain and constraint.
    pub fn check(&self, assignment: &Assignment) -> Result<(), Violation> {
        if assignment.len() != self.decisions.len() {
            return Err(Violation::Shape {
                expected: self.decisions.len(),
                actual: assignment.len(),
            });
        }
        for (i, d) in self.decisions.decisions().iter().enumerate() {
            if d.domain == Domain::FixedZero && assignment.value(i) {
                return Err(Violation::Domain(d.id));
            }
        }
        match self
            .constraints
            .iter()
            .find(|c| !c.holds(|t| assignment.value(t)))
        {
            Some(c) => Err(Violation::Constraint(c.id)),
            None => Ok(()),
        }
    }
}
