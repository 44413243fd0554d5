//! Rules about when approvals happen: trailing windows, calendar buckets,
//! and month-over-month continuity.

use std::collections::{BTreeMap, BTreeSet};

use chrono::TimeDelta;
use kudos_core::model::Priority;

use super::{
    CONTINUITY_MONTHS, CRITICAL_MONTHLY_BURST_MIN, DAILY_BURST_MIN, RECENT_SPRINT_MIN,
    RECENT_SPRINT_WINDOW_DAYS, SUSTAINED_MIN_PERCENT, SUSTAINED_MONTHS,
};
use crate::aggregate::{
    MonthKey, approved_at, group_by_calendar_day, group_by_calendar_month, is_within,
    longest_consecutive_month_streak, max_bucket, ratio, trailing_months,
};
use crate::context::EvaluationContext;

/// At least 30 approvals no earlier than 30 days before `now`.
#[must_use]
pub fn recent_sprint(ctx: &EvaluationContext<'_>) -> bool {
    let window = TimeDelta::days(RECENT_SPRINT_WINDOW_DAYS);
    let recent = ctx
        .snapshots
        .iter()
        .filter_map(approved_at)
        .filter(|&at| is_within(at, ctx.now, window))
        .count();
    recent >= RECENT_SPRINT_MIN
}

/// Some calendar day holds at least 5 approvals.
#[must_use]
pub fn daily_burst(ctx: &EvaluationContext<'_>) -> bool {
    max_bucket(&group_by_calendar_day(ctx.snapshots, approved_at, ctx.zone)) >= DAILY_BURST_MIN
}

/// Some calendar month holds at least 20 CRITICAL approvals.
#[must_use]
pub fn critical_monthly_burst(ctx: &EvaluationContext<'_>) -> bool {
    let months = group_by_calendar_month(ctx.approved_with(Priority::Critical), approved_at, ctx.zone);
    max_bucket(&months) >= CRITICAL_MONTHLY_BURST_MIN
}

/// Every one of the trailing 6 months, current month included, has an approval.
#[must_use]
pub fn continuity(ctx: &EvaluationContext<'_>) -> bool {
    let months = group_by_calendar_month(ctx.snapshots, approved_at, ctx.zone);
    let window = trailing_months(ctx.current_month(), CONTINUITY_MONTHS);
    window_fully_covered(&window, &months)
}

/// At least 90% of all approvals fall in the trailing 12 months, and each
/// of those 12 months has an approval.
#[must_use]
pub fn sustained_monthly(ctx: &EvaluationContext<'_>) -> bool {
    let months = group_by_calendar_month(ctx.snapshots, approved_at, ctx.zone);
    let total: usize = months.values().sum();
    if total == 0 {
        return false;
    }

    let window = trailing_months(ctx.current_month(), SUSTAINED_MONTHS);
    let in_window: usize = window.iter().filter_map(|key| months.get(key)).sum();

    ratio(in_window, total) >= SUSTAINED_MIN_PERCENT && window_fully_covered(&window, &months)
}

fn window_fully_covered(window: &[MonthKey], months: &BTreeMap<MonthKey, usize>) -> bool {
    if window.is_empty() {
        return false;
    }
    let present: BTreeSet<MonthKey> = window
        .iter()
        .copied()
        .filter(|key| months.contains_key(key))
        .collect();
    longest_consecutive_month_streak(&present) == window.len()
}
