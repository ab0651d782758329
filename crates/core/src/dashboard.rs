//! Per-user dashboard counter rules.
//!
//! Counters are maintained incrementally: each Problem/Topic mutation maps to
//! a [`CounterDelta`], and [`DashboardCounters::apply`] adds it and clamps every
//! counter to a floor of zero. [`DashboardCounters::recompute`] is the
//! authoritative resync from row counts.
//!
//! `revised_this_week` never goes down through a delta: neither reverting a
//! Solved problem nor deleting one produces a negative delta for it.

use serde::Serialize;

use crate::problem::ProblemStatus;

/// Aggregate counters for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DashboardCounters {
    pub total_problems: i64,
    pub revised_this_week: i64,
    pub remaining_to_revise: i64,
    pub total_topics: i64,
}

/// Signed adjustment produced by a single mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterDelta {
    pub total_problems: i64,
    pub revised_this_week: i64,
    pub remaining_to_revise: i64,
    pub total_topics: i64,
}

impl CounterDelta {
    /// A new Problem was created with `status`.
    pub fn problem_created(status: ProblemStatus) -> Self {
        if status.is_solved() {
            Self {
                total_problems: 1,
                revised_this_week: 1,
                ..Self::default()
            }
        } else {
            Self {
                total_problems: 1,
                remaining_to_revise: 1,
                ..Self::default()
            }
        }
    }

    /// A Problem moved from `previous` to `current`.
    ///
    /// Returns `None` when the solved-ness did not change, so callers can skip
    /// the write entirely.
    pub fn status_changed(previous: ProblemStatus, current: ProblemStatus) -> Option<Self> {
        match (previous.is_solved(), current.is_solved()) {
            (false, true) => Some(Self {
                revised_this_week: 1,
                remaining_to_revise: -1,
                ..Self::default()
            }),
            (true, false) => Some(Self {
                remaining_to_revise: 1,
                ..Self::default()
            }),
            _ => None,
        }
    }

    /// A Problem whose last status was `status` was deleted.
    pub fn problem_deleted(status: ProblemStatus) -> Self {
        Self {
            total_problems: -1,
            remaining_to_revise: if status.is_solved() { 0 } else { -1 },
            ..Self::default()
        }
    }

    pub fn topic_created() -> Self {
        Self {
            total_topics: 1,
            ..Self::default()
        }
    }

    pub fn topic_deleted() -> Self {
        Self {
            total_topics: -1,
            ..Self::default()
        }
    }
}

impl DashboardCounters {
    /// Add `delta` and clamp every counter to `>= 0`.
    #[must_use]
    pub fn apply(self, delta: &CounterDelta) -> Self {
        Self {
            total_problems: self.total_problems + delta.total_problems,
            revised_this_week: self.revised_this_week + delta.revised_this_week,
            remaining_to_revise: self.remaining_to_revise + delta.remaining_to_revise,
            total_topics: self.total_topics + delta.total_topics,
        }
        .clamped()
    }

    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            total_problems: self.total_problems.max(0),
            revised_this_week: self.revised_this_week.max(0),
            remaining_to_revise: self.remaining_to_revise.max(0),
            total_topics: self.total_topics.max(0),
        }
    }

    /// Rebuild counters from row counts.
    ///
    /// `remaining_to_revise` is everything not solved, floored at zero.
    pub fn recompute(total_problems: i64, solved_problems: i64, total_topics: i64) -> Self {
        Self {
            total_problems,
            revised_this_week: solved_problems,
            remaining_to_revise: total_problems - solved_problems,
            total_topics,
        }
        .clamped()
    }
}
