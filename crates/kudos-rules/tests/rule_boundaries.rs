//! Boundary-value suite for every achievement rule.
//!
//! For each counting rule, a history with exactly the threshold number of
//! qualifying items unlocks it and one fewer does not. Window and deadline
//! rules are probed at their exact edges.

mod support;

use chrono::{TimeDelta, TimeZone, Timelike, Utc};
use kudos_core::model::{Priority, TaskSnapshot};
use kudos_rules::{AchievementId, PrefetchedFlags};
use support::{holds, holds_with, in_month, many, now, snapshot, task_id};

fn ids(range: std::ops::Range<usize>) -> Vec<kudos_core::model::TaskId> {
    range.map(task_id).collect()
}

// ---------------------------------------------------------------------------
// Volume
// ---------------------------------------------------------------------------

#[test]
fn first_approval_needs_one_approved_item() {
    assert!(holds(AchievementId::FirstApproval, &many(0, 1, |b| b)));
    assert!(!holds(AchievementId::FirstApproval, &[]));
    assert!(!holds(
        AchievementId::FirstApproval,
        &many(0, 3, support::SnapshotBuilder::unapproved)
    ));
}

#[test]
fn century_boundary() {
    assert!(holds(AchievementId::Century, &many(0, 100, |b| b)));
    assert!(!holds(AchievementId::Century, &many(0, 99, |b| b)));
}

#[test]
fn high_priority_volume_boundary() {
    let high = |b: support::SnapshotBuilder| b.priority(Priority::High);
    assert!(holds(AchievementId::HighPriorityVolume, &many(0, 20, high)));
    assert!(!holds(AchievementId::HighPriorityVolume, &many(0, 19, high)));
}

#[test]
fn high_priority_volume_ignores_other_priorities() {
    let mut items = many(0, 19, |b| b.priority(Priority::High));
    items.extend(many(100, 30, support::SnapshotBuilder::critical));
    assert!(!holds(AchievementId::HighPriorityVolume, &items));
}

#[test]
fn critical_volume_boundary() {
    assert!(holds(
        AchievementId::CriticalVolume,
        &many(0, 40, support::SnapshotBuilder::critical)
    ));
    assert!(!holds(
        AchievementId::CriticalVolume,
        &many(0, 39, support::SnapshotBuilder::critical)
    ));
}

#[test]
fn team_diversity_boundary() {
    let teams = ["atlas", "borealis", "cirrus", "delta", "ember"];
    let five: Vec<TaskSnapshot> = teams
        .iter()
        .enumerate()
        .map(|(n, team)| snapshot(n).team(team).build())
        .collect();
    assert!(holds(AchievementId::TeamDiversity, &five));
    assert!(!holds(AchievementId::TeamDiversity, &five[..4]));
}

#[test]
fn team_diversity_counts_distinct_teams_not_items() {
    let teams = ["atlas", "borealis", "cirrus", "delta"];
    let items: Vec<TaskSnapshot> = (0..40)
        .map(|n| snapshot(n).team(teams[n % teams.len()]).build())
        .collect();
    assert!(!holds(AchievementId::TeamDiversity, &items));
}

// ---------------------------------------------------------------------------
// Cadence
// ---------------------------------------------------------------------------

#[test]
fn recent_sprint_boundary() {
    assert!(holds(AchievementId::RecentSprint, &many(0, 30, |b| b)));

    let mut items = many(0, 29, |b| b);
    items.push(snapshot(99).approved(now() - TimeDelta::days(31)).build());
    assert!(!holds(AchievementId::RecentSprint, &items));
}

#[test]
fn recent_sprint_window_start_is_inclusive() {
    let mut at_edge = many(0, 29, |b| b);
    at_edge.push(snapshot(99).approved(now() - TimeDelta::days(30)).build());
    assert!(holds(AchievementId::RecentSprint, &at_edge));

    let mut just_outside = many(0, 29, |b| b);
    just_outside.push(
        snapshot(99)
            .approved(now() - TimeDelta::days(30) - TimeDelta::milliseconds(1))
            .build(),
    );
    assert!(!holds(AchievementId::RecentSprint, &just_outside));
}

#[test]
fn daily_burst_boundary() {
    let same_day = |count: usize| -> Vec<TaskSnapshot> {
        (0..count)
            .map(|n| {
                let hours = i64::try_from(n).unwrap() + 1;
                snapshot(n).approved(now() - TimeDelta::hours(hours)).build()
            })
            .collect()
    };
    assert!(holds(AchievementId::DailyBurst, &same_day(5)));
    assert!(!holds(AchievementId::DailyBurst, &same_day(4)));
}

#[test]
fn daily_burst_does_not_merge_across_midnight() {
    let last_instant = Utc
        .with_ymd_and_hms(2025, 6, 14, 23, 59, 59)
        .unwrap()
        .with_nanosecond(999_000_000)
        .unwrap();
    let midnight = Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap();

    let mut items: Vec<TaskSnapshot> = (0..4)
        .map(|n| snapshot(n).approved(last_instant - TimeDelta::minutes(n as i64)).build())
        .collect();
    items.push(snapshot(9).approved(midnight).build());
    assert!(!holds(AchievementId::DailyBurst, &items));

    items.push(snapshot(10).approved(last_instant - TimeDelta::hours(5)).build());
    assert!(holds(AchievementId::DailyBurst, &items));
}

#[test]
fn critical_monthly_burst_boundary() {
    let last_month = in_month(1);
    let critical_in = |b: support::SnapshotBuilder| b.critical().approved(last_month);
    assert!(holds(AchievementId::CriticalMonthlyBurst, &many(0, 20, critical_in)));

    let mut items = many(0, 19, critical_in);
    items.push(snapshot(50).priority(Priority::High).approved(last_month).build());
    assert!(!holds(AchievementId::CriticalMonthlyBurst, &items));
}

#[test]
fn critical_monthly_burst_needs_a_single_month() {
    let mut items = many(0, 10, |b| b.critical().approved(in_month(1)));
    items.extend(many(10, 10, |b| b.critical().approved(in_month(2))));
    assert!(!holds(AchievementId::CriticalMonthlyBurst, &items));
}

#[test]
fn continuity_needs_each_of_the_last_six_months() {
    let items: Vec<TaskSnapshot> = (0..6).map(|m| snapshot(m).approved(in_month(m)).build()).collect();
    assert!(holds(AchievementId::Continuity, &items));

    let gap: Vec<TaskSnapshot> = (0..6)
        .filter(|m| *m != 3)
        .map(|m| snapshot(m).approved(in_month(m)).build())
        .collect();
    assert!(!holds(AchievementId::Continuity, &gap));
}

#[test]
fn continuity_must_include_the_current_month() {
    let items: Vec<TaskSnapshot> = (1..=6).map(|m| snapshot(m).approved(in_month(m)).build()).collect();
    assert!(!holds(AchievementId::Continuity, &items));
}

#[test]
fn sustained_monthly_with_every_item_in_window() {
    let items: Vec<TaskSnapshot> = (0..12).map(|m| snapshot(m).approved(in_month(m)).build()).collect();
    assert!(holds(AchievementId::SustainedMonthly, &items));
    assert!(!holds(AchievementId::SustainedMonthly, &items[..11]));
}

#[test]
fn sustained_monthly_ratio_boundary() {
    // 18 of 20 approvals inside the window: exactly 90%.
    let mut items: Vec<TaskSnapshot> = (0..12).map(|m| snapshot(m).approved(in_month(m)).build()).collect();
    items.extend(many(100, 6, |b| b.approved(in_month(0))));
    items.extend(many(200, 2, |b| b.approved(in_month(13))));
    assert!(holds(AchievementId::SustainedMonthly, &items));

    // 12 of 14: below 90%.
    let mut sparse: Vec<TaskSnapshot> = (0..12).map(|m| snapshot(m).approved(in_month(m)).build()).collect();
    sparse.extend(many(200, 2, |b| b.approved(in_month(13))));
    assert!(!holds(AchievementId::SustainedMonthly, &sparse));
}

// ---------------------------------------------------------------------------
// Deadlines
// ---------------------------------------------------------------------------

#[test]
fn deadline_discipline_boundary() {
    let early = |b: support::SnapshotBuilder| b.due_after_approval(TimeDelta::hours(1));
    assert!(holds(AchievementId::DeadlineDiscipline, &many(0, 20, early)));

    let mut items = many(0, 19, early);
    // Exactly at the due instant is not "before" it.
    items.push(snapshot(50).due_after_approval(TimeDelta::zero()).build());
    // Undated items never count.
    items.extend(many(60, 10, |b| b));
    // Late items never count.
    items.extend(many(80, 5, |b| b.due_after_approval(-TimeDelta::hours(1))));
    assert!(!holds(AchievementId::DeadlineDiscipline, &items));
}

#[test]
fn on_time_rate_boundary() {
    let on_time = |b: support::SnapshotBuilder| b.due_after_approval(TimeDelta::hours(3));
    let late = |b: support::SnapshotBuilder| b.due_after_approval(-TimeDelta::minutes(1));

    let mut exactly_ninety = many(0, 90, on_time);
    exactly_ninety.extend(many(90, 10, late));
    assert!(holds(AchievementId::OnTimeRate, &exactly_ninety));

    let mut eighty_nine = many(0, 89, on_time);
    eighty_nine.extend(many(89, 11, late));
    assert!(!holds(AchievementId::OnTimeRate, &eighty_nine));
}

#[test]
fn on_time_rate_counts_approval_at_due_instant_as_on_time() {
    let mut items = many(0, 9, |b| b.due_after_approval(TimeDelta::zero()));
    items.extend(many(9, 1, |b| b.due_after_approval(-TimeDelta::milliseconds(1))));
    assert!(holds(AchievementId::OnTimeRate, &items));
}

#[test]
fn on_time_rate_excludes_undated_items() {
    let mut items = many(0, 9, |b| b.due_after_approval(TimeDelta::hours(1)));
    items.extend(many(9, 1, |b| b.due_after_approval(-TimeDelta::hours(1))));
    items.extend(many(100, 40, |b| b));
    assert!(holds(AchievementId::OnTimeRate, &items));

    assert!(!holds(AchievementId::OnTimeRate, &many(0, 40, |b| b)));
}

#[test]
fn near_miss_save_window_edges() {
    let with_slack = |slack: TimeDelta| vec![snapshot(0).due_after_approval(slack).build()];

    assert!(holds(AchievementId::NearMissSave, &with_slack(TimeDelta::minutes(5))));
    assert!(holds(AchievementId::NearMissSave, &with_slack(TimeDelta::zero())));
    assert!(!holds(
        AchievementId::NearMissSave,
        &with_slack(TimeDelta::minutes(5) + TimeDelta::milliseconds(1))
    ));
    assert!(!holds(
        AchievementId::NearMissSave,
        &with_slack(-TimeDelta::milliseconds(1))
    ));
    assert!(!holds(AchievementId::NearMissSave, &many(0, 10, |b| b)));
}

// ---------------------------------------------------------------------------
// Durations
// ---------------------------------------------------------------------------

#[test]
fn quick_finisher_boundary() {
    let fast = |b: support::SnapshotBuilder| b.took(TimeDelta::hours(1));
    let slow = |b: support::SnapshotBuilder| b.took(TimeDelta::hours(10));

    let mut twenty = many(0, 20, fast);
    twenty.extend(many(20, 20, slow));
    assert!(holds(AchievementId::QuickFinisher, &twenty));

    let mut nineteen = many(0, 19, fast);
    nineteen.extend(many(19, 21, slow));
    assert!(!holds(AchievementId::QuickFinisher, &nineteen));
}

#[test]
fn quick_finisher_cutoff_is_inclusive() {
    // Mean is 10h; 9h is exactly 90% of it.
    let mut items = many(0, 20, |b| b.took(TimeDelta::hours(9)));
    items.extend(many(20, 20, |b| b.took(TimeDelta::hours(11))));
    assert!(holds(AchievementId::QuickFinisher, &items));
}

#[test]
fn quick_finisher_needs_a_baseline() {
    assert!(!holds(
        AchievementId::QuickFinisher,
        &many(0, 1, |b| b.took(TimeDelta::minutes(1)))
    ));
    // Identical durations are never 10% faster than their own mean.
    assert!(!holds(
        AchievementId::QuickFinisher,
        &many(0, 40, |b| b.took(TimeDelta::hours(4)))
    ));
}

#[test]
fn quick_finisher_ignores_zero_mean() {
    assert!(!holds(
        AchievementId::QuickFinisher,
        &many(0, 20, |b| b.took(TimeDelta::zero()))
    ));
    assert!(!holds(
        AchievementId::QuickFinisher,
        &many(0, 20, |b| b.took(TimeDelta::hours(4)))
    ));
}

#[test]
fn fast_critical_turnaround_window_edges() {
    assert!(holds(
        AchievementId::FastCriticalTurnaround,
        &many(0, 1, |b| b.critical().took(TimeDelta::hours(24)))
    ));
    assert!(!holds(
        AchievementId::FastCriticalTurnaround,
        &many(0, 1, |b| b.critical().took(TimeDelta::hours(24) + TimeDelta::seconds(1)))
    ));
    assert!(!holds(
        AchievementId::FastCriticalTurnaround,
        &many(0, 5, |b| b.priority(Priority::High).took(TimeDelta::minutes(10)))
    ));
}

#[test]
fn long_haul_boundary() {
    let long = |b: support::SnapshotBuilder| b.took(TimeDelta::days(7) + TimeDelta::seconds(1));
    assert!(holds(AchievementId::LongHaul, &many(0, 50, long)));

    let mut items = many(0, 49, long);
    // Exactly seven days is not longer than seven days.
    items.push(snapshot(99).took(TimeDelta::days(7)).build());
    assert!(!holds(AchievementId::LongHaul, &items));
}

#[test]
fn negative_durations_are_ignored() {
    let items = many(0, 60, |b| b.took(-TimeDelta::days(8)));
    assert!(!holds(AchievementId::LongHaul, &items));
    assert!(!holds(
        AchievementId::FastCriticalTurnaround,
        &many(0, 1, |b| b.critical().took(-TimeDelta::hours(1)))
    ));
}

// ---------------------------------------------------------------------------
// Activity
// ---------------------------------------------------------------------------

#[test]
fn rejection_recovery_boundary() {
    let items = many(0, 12, |b| b);
    let ten = PrefetchedFlags::new().with_cancelled(ids(0..10));
    let nine = PrefetchedFlags::new().with_cancelled(ids(0..9));
    assert!(holds_with(AchievementId::RejectionRecovery, &items, &ten));
    assert!(!holds_with(AchievementId::RejectionRecovery, &items, &nine));
}

#[test]
fn rejection_recovery_requires_final_approval() {
    let mut items = many(0, 9, |b| b);
    items.push(snapshot(9).unapproved().build());
    let flags = PrefetchedFlags::new().with_cancelled(ids(0..10));
    assert!(!holds_with(AchievementId::RejectionRecovery, &items, &flags));
}

#[test]
fn bug_fixer_boundary() {
    let items = many(0, 120, |b| b);
    let hundred = PrefetchedFlags::new().with_commented(ids(0..100));
    let ninety_nine = PrefetchedFlags::new().with_commented(ids(0..99));
    assert!(holds_with(AchievementId::BugFixer, &items, &hundred));
    assert!(!holds_with(AchievementId::BugFixer, &items, &ninety_nine));
}

#[test]
fn review_resolver_boundary() {
    let items = many(0, 40, |b| b);
    let thirty = PrefetchedFlags::new().with_commented(ids(0..30));
    let twenty_nine = PrefetchedFlags::new().with_commented(ids(0..29));
    assert!(holds_with(AchievementId::ReviewResolver, &items, &thirty));
    assert!(!holds_with(AchievementId::ReviewResolver, &items, &twenty_nine));
}

#[test]
fn bug_reporter_counts_only_critical_items() {
    let mut items = many(0, 25, support::SnapshotBuilder::critical);
    items.extend(many(25, 10, |b| b.priority(Priority::High)));

    let all_commented = PrefetchedFlags::new().with_commented(ids(0..35));
    assert!(holds_with(AchievementId::BugReporter, &items, &all_commented));

    let twenty_four_critical = PrefetchedFlags::new()
        .with_commented(ids(0..24))
        .with_commented(ids(25..35));
    assert!(!holds_with(
        AchievementId::BugReporter,
        &items,
        &twenty_four_critical
    ));
}

#[test]
fn comment_rules_ignore_uncommented_history() {
    let items = many(0, 200, support::SnapshotBuilder::critical);
    let flags = PrefetchedFlags::new();
    for id in [
        AchievementId::BugFixer,
        AchievementId::BugReporter,
        AchievementId::ReviewResolver,
        AchievementId::RejectionRecovery,
    ] {
        assert!(!holds_with(id, &items, &flags), "{id} should need activity");
    }
}
