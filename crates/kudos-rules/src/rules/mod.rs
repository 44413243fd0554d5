//! Achievement predicates.
//!
//! # Overview
//!
//! Each predicate is a pure function of an [`EvaluationContext`] returning a
//! hard boolean. Predicates are grouped by the kind of question they ask:
//!
//! - **volume** (`volume`): filtered counts over approved items, plus the
//!   distinct-team count.
//! - **deadline** (`deadline`): comparisons between approval and due instants.
//! - **duration** (`duration`): creation-to-approval durations.
//! - **cadence** (`cadence`): trailing windows and calendar buckets.
//! - **activity** (`activity`): per-item comment and cancellation facts from
//!   the context's lookup.
//!
//! All thresholds are fixed constants below. An empty snapshot list makes
//! every predicate false; items missing a field a rule needs are left out of
//! that rule's eligible set.

pub mod activity;
pub mod cadence;
pub mod deadline;
pub mod duration;
pub mod volume;

use crate::catalog::AchievementId;
use crate::context::EvaluationContext;

pub const FIRST_APPROVAL_MIN: usize = 1;
pub const CENTURY_MIN: usize = 100;
pub const HIGH_PRIORITY_MIN: usize = 20;
pub const CRITICAL_VOLUME_MIN: usize = 40;
pub const TEAM_DIVERSITY_MIN: usize = 5;

pub const RECENT_SPRINT_MIN: usize = 30;
pub const RECENT_SPRINT_WINDOW_DAYS: i64 = 30;
pub const DAILY_BURST_MIN: usize = 5;
pub const CRITICAL_MONTHLY_BURST_MIN: usize = 20;
pub const CONTINUITY_MONTHS: usize = 6;
pub const SUSTAINED_MONTHS: usize = 12;
pub const SUSTAINED_MIN_PERCENT: f64 = 90.0;

pub const DEADLINE_DISCIPLINE_MIN: usize = 20;
pub const ON_TIME_RATE_MIN_PERCENT: f64 = 90.0;
pub const NEAR_MISS_WINDOW_MINUTES: i64 = 5;

pub const QUICK_FINISHER_MIN: usize = 20;
/// Quick means at most `NUMERATOR / DENOMINATOR` of the mean duration.
pub const QUICK_FINISHER_NUMERATOR: i128 = 9;
pub const QUICK_FINISHER_DENOMINATOR: i128 = 10;
pub const FAST_CRITICAL_WINDOW_HOURS: i64 = 24;
pub const LONG_HAUL_MIN: usize = 50;
pub const LONG_HAUL_DAYS: i64 = 7;

pub const REJECTION_RECOVERY_MIN: usize = 10;
pub const BUG_FIXER_MIN: usize = 100;
pub const BUG_REPORTER_MIN: usize = 25;
pub const REVIEW_RESOLVER_MIN: usize = 30;

/// Signature shared by every predicate.
pub type RuleFn = fn(&EvaluationContext<'_>) -> bool;

/// Predicate deciding `id`.
#[must_use]
pub fn rule_for(id: AchievementId) -> RuleFn {
    match id {
        AchievementId::FirstApproval => volume::first_approval,
        AchievementId::Century => volume::century,
        AchievementId::HighPriorityVolume => volume::high_priority_volume,
        AchievementId::CriticalVolume => volume::critical_volume,
        AchievementId::TeamDiversity => volume::team_diversity,
        AchievementId::RecentSprint => cadence::recent_sprint,
        AchievementId::DailyBurst => cadence::daily_burst,
        AchievementId::CriticalMonthlyBurst => cadence::critical_monthly_burst,
        AchievementId::Continuity => cadence::continuity,
        AchievementId::SustainedMonthly => cadence::sustained_monthly,
        AchievementId::DeadlineDiscipline => deadline::deadline_discipline,
        AchievementId::OnTimeRate => deadline::on_time_rate,
        AchievementId::NearMissSave => deadline::near_miss_save,
        AchievementId::QuickFinisher => duration::quick_finisher,
        AchievementId::FastCriticalTurnaround => duration::fast_critical_turnaround,
        AchievementId::LongHaul => duration::long_haul,
        AchievementId::RejectionRecovery => activity::rejection_recovery,
        AchievementId::BugFixer => activity::bug_fixer,
        AchievementId::BugReporter => activity::bug_reporter,
        AchievementId::ReviewResolver => activity::review_resolver,
    }
}
