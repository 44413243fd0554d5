use chrono::{DateTime, FixedOffset, Utc};
use kudos_core::model::{Priority, TaskSnapshot};

use crate::aggregate::MonthKey;
use crate::lookup::AuxiliaryLookup;

/// Everything a rule may look at during one evaluation run.
///
/// Built once per run. `now` is captured by the caller before any rule runs
/// and never re-read.
#[derive(Clone, Copy)]
pub struct EvaluationContext<'a> {
    pub snapshots: &'a [TaskSnapshot],
    pub now: DateTime<Utc>,
    pub zone: FixedOffset,
    pub lookup: &'a dyn AuxiliaryLookup,
}

impl<'a> EvaluationContext<'a> {
    #[must_use]
    pub fn new(
        snapshots: &'a [TaskSnapshot],
        now: DateTime<Utc>,
        zone: FixedOffset,
        lookup: &'a dyn AuxiliaryLookup,
    ) -> Self {
        Self {
            snapshots,
            now,
            zone,
            lookup,
        }
    }

    /// Snapshots that actually carry an approval instant.
    pub fn approved(self) -> impl Iterator<Item = &'a TaskSnapshot> {
        self.snapshots.iter().filter(|s| s.approved_at.is_some())
    }

    /// Approved snapshots of exactly `priority`.
    pub fn approved_with(self, priority: Priority) -> impl Iterator<Item = &'a TaskSnapshot> {
        self.approved().filter(move |s| s.priority == priority)
    }

    /// Calendar month containing `now` in the evaluation zone.
    #[must_use]
    pub fn current_month(self) -> MonthKey {
        MonthKey::of_instant(self.now, self.zone)
    }
}

impl std::fmt::Debug for EvaluationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvaluationContext")
            .field("snapshots", &self.snapshots.len())
            .field("now", &self.now)
            .field("zone", &self.zone)
            .finish_non_exhaustive()
    }
}
