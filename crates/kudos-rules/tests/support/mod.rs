//! Snapshot builders shared by the rule test suites.

#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone, Utc};
use kudos_core::model::{Priority, TaskId, TaskSnapshot, TeamId};
use kudos_rules::aggregate::MonthKey;
use kudos_rules::{AchievementId, AuxiliaryLookup, EvaluationContext, NoActivity, evaluate_rule};

/// Fixed evaluation instant used by every suite.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

pub fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

pub fn task_id(n: usize) -> TaskId {
    TaskId::parse(format!("t-{n}")).unwrap()
}

/// Noon on the 10th of the month `months_back` months before `now()`.
pub fn in_month(months_back: usize) -> DateTime<Utc> {
    let mut key = MonthKey::of_instant(now(), utc());
    for _ in 0..months_back {
        key = key.prev();
    }
    Utc.with_ymd_and_hms(key.year, key.month, 10, 12, 0, 0).unwrap()
}

pub struct SnapshotBuilder {
    inner: TaskSnapshot,
}

/// Item `n`: MEDIUM, team `core`, created two hours and approved one hour
/// before `now()`, no due date.
pub fn snapshot(n: usize) -> SnapshotBuilder {
    SnapshotBuilder {
        inner: TaskSnapshot {
            id: task_id(n),
            created_at: now() - TimeDelta::hours(2),
            approved_at: Some(now() - TimeDelta::hours(1)),
            expiration_date: None,
            priority: Priority::Medium,
            team_id: TeamId::parse("core").unwrap(),
        },
    }
}

impl SnapshotBuilder {
    pub fn priority(mut self, priority: Priority) -> Self {
        self.inner.priority = priority;
        self
    }

    pub fn critical(self) -> Self {
        self.priority(Priority::Critical)
    }

    pub fn team(mut self, team: &str) -> Self {
        self.inner.team_id = TeamId::parse(team).unwrap();
        self
    }

    pub fn created(mut self, at: DateTime<Utc>) -> Self {
        self.inner.created_at = at;
        self
    }

    /// Approve at `at`, keeping the creation instant two hours earlier.
    pub fn approved(mut self, at: DateTime<Utc>) -> Self {
        self.inner.approved_at = Some(at);
        self.inner.created_at = at - TimeDelta::hours(2);
        self
    }

    pub fn unapproved(mut self) -> Self {
        self.inner.approved_at = None;
        self
    }

    /// Take `duration` from creation to approval, approving at the default instant.
    pub fn took(mut self, duration: TimeDelta) -> Self {
        let approved = self.inner.approved_at.unwrap_or_else(now);
        self.inner.created_at = approved - duration;
        self
    }

    /// Due `slack` after approval (negative slack means approved late).
    pub fn due_after_approval(mut self, slack: TimeDelta) -> Self {
        let approved = self.inner.approved_at.unwrap_or_else(now);
        self.inner.expiration_date = Some(approved + slack);
        self
    }

    pub fn build(self) -> TaskSnapshot {
        self.inner
    }
}

/// `count` snapshots numbered from `start`, each shaped by `shape`.
pub fn many(
    start: usize,
    count: usize,
    shape: impl Fn(SnapshotBuilder) -> SnapshotBuilder,
) -> Vec<TaskSnapshot> {
    (start..start + count).map(|n| shape(snapshot(n)).build()).collect()
}

pub fn holds(id: AchievementId, snapshots: &[TaskSnapshot]) -> bool {
    holds_with(id, snapshots, &NoActivity)
}

pub fn holds_with(
    id: AchievementId,
    snapshots: &[TaskSnapshot],
    lookup: &dyn AuxiliaryLookup,
) -> bool {
    let ctx = EvaluationContext::new(snapshots, now(), utc(), lookup);
    evaluate_rule(id, &ctx)
}
