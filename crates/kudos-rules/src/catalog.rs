//! The closed set of achievements the evaluator decides on.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Stable achievement identifiers.
///
/// The kebab-case form returned by [`AchievementId::as_str`] is the wire
/// identifier; it never changes once published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AchievementId {
    FirstApproval,
    Century,
    HighPriorityVolume,
    CriticalVolume,
    RecentSprint,
    DeadlineDiscipline,
    OnTimeRate,
    QuickFinisher,
    DailyBurst,
    CriticalMonthlyBurst,
    RejectionRecovery,
    BugFixer,
    BugReporter,
    ReviewResolver,
    NearMissSave,
    FastCriticalTurnaround,
    TeamDiversity,
    Continuity,
    LongHaul,
    SustainedMonthly,
}

impl AchievementId {
    /// Every achievement, in evaluation order.
    pub const ALL: [Self; 20] = [
        Self::FirstApproval,
        Self::Century,
        Self::HighPriorityVolume,
        Self::CriticalVolume,
        Self::RecentSprint,
        Self::DeadlineDiscipline,
        Self::OnTimeRate,
        Self::QuickFinisher,
        Self::DailyBurst,
        Self::CriticalMonthlyBurst,
        Self::RejectionRecovery,
        Self::BugFixer,
        Self::BugReporter,
        Self::ReviewResolver,
        Self::NearMissSave,
        Self::FastCriticalTurnaround,
        Self::TeamDiversity,
        Self::Continuity,
        Self::LongHaul,
        Self::SustainedMonthly,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstApproval => "first-approval",
            Self::Century => "century",
            Self::HighPriorityVolume => "high-priority-volume",
            Self::CriticalVolume => "critical-volume",
            Self::RecentSprint => "recent-sprint",
            Self::DeadlineDiscipline => "deadline-discipline",
            Self::OnTimeRate => "on-time-rate",
            Self::QuickFinisher => "quick-finisher",
            Self::DailyBurst => "daily-burst",
            Self::CriticalMonthlyBurst => "critical-monthly-burst",
            Self::RejectionRecovery => "rejection-recovery",
            Self::BugFixer => "bug-fixer",
            Self::BugReporter => "bug-reporter",
            Self::ReviewResolver => "review-resolver",
            Self::NearMissSave => "near-miss-save",
            Self::FastCriticalTurnaround => "fast-critical-turnaround",
            Self::TeamDiversity => "team-diversity",
            Self::Continuity => "continuity",
            Self::LongHaul => "long-haul",
            Self::SustainedMonthly => "sustained-monthly",
        }
    }

    /// One-line description of the unlock condition.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::FirstApproval => "Had a first work item approved",
            Self::Century => "Had 100 work items approved",
            Self::HighPriorityVolume => "Had 20 high-priority items approved",
            Self::CriticalVolume => "Had 40 critical items approved",
            Self::RecentSprint => "Had 30 items approved within the last 30 days",
            Self::DeadlineDiscipline => "Had 20 items approved before their due date",
            Self::OnTimeRate => "Kept at least 90% of dated items on time",
            Self::QuickFinisher => "Finished 20 items at least 10% faster than average",
            Self::DailyBurst => "Had 5 items approved on a single day",
            Self::CriticalMonthlyBurst => "Had 20 critical items approved in a single month",
            Self::RejectionRecovery => "Got 10 previously rejected items approved",
            Self::BugFixer => "Resolved 100 items that carried comments",
            Self::BugReporter => "Resolved 25 commented critical items",
            Self::ReviewResolver => "Resolved 30 items with review comments",
            Self::NearMissSave => "Got an item approved in the last 5 minutes before its deadline",
            Self::FastCriticalTurnaround => "Got a critical item approved within 24 hours",
            Self::TeamDiversity => "Completed work for 5 different teams",
            Self::Continuity => "Had an approval in each of the last 6 months",
            Self::LongHaul => "Completed 50 items that ran longer than 7 days",
            Self::SustainedMonthly => "Delivered steadily every month for the last 12 months",
        }
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unknown achievement identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAchievement(pub String);

impl fmt::Display for UnknownAchievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown achievement: '{}'", self.0)
    }
}

impl std::error::Error for UnknownAchievement {}

impl FromStr for AchievementId {
    type Err = UnknownAchievement;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == normalized)
            .ok_or_else(|| UnknownAchievement(s.to_string()))
    }
}
