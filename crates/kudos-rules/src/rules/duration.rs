//! Rules over creation-to-approval durations.
//!
//! A negative duration (approval recorded before creation) is malformed and
//! excluded, as is a duration too large to express in microseconds.

use chrono::TimeDelta;
use kudos_core::model::{Priority, TaskSnapshot};

use super::{
    FAST_CRITICAL_WINDOW_HOURS, LONG_HAUL_DAYS, LONG_HAUL_MIN, QUICK_FINISHER_DENOMINATOR,
    QUICK_FINISHER_MIN, QUICK_FINISHER_NUMERATOR,
};
use crate::context::EvaluationContext;

fn valid_duration(snapshot: &TaskSnapshot) -> Option<TimeDelta> {
    snapshot
        .completion_duration()
        .filter(|duration| *duration >= TimeDelta::zero())
}

/// At least 20 items finished in no more than 90% of the mean duration.
///
/// The mean is taken over every item with a valid duration, and needs at
/// least two of them and a positive total. The comparison `d <= 0.9 * mean` is done as
/// `10 * d * n <= 9 * sum` in integers so it is exact.
#[must_use]
pub fn quick_finisher(ctx: &EvaluationContext<'_>) -> bool {
    let durations: Vec<i128> = ctx
        .snapshots
        .iter()
        .filter_map(valid_duration)
        .filter_map(|duration| duration.num_microseconds())
        .map(i128::from)
        .collect();

    if durations.len() < 2 {
        return false;
    }

    let count = i128::try_from(durations.len()).unwrap_or(i128::MAX);
    let total: i128 = durations.iter().sum();
    if total <= 0 {
        return false;
    }

    let quick = durations
        .iter()
        .filter(|&&micros| {
            QUICK_FINISHER_DENOMINATOR * micros * count <= QUICK_FINISHER_NUMERATOR * total
        })
        .count();

    quick >= QUICK_FINISHER_MIN
}

/// Some CRITICAL item approved within 24 hours of creation (inclusive).
#[must_use]
pub fn fast_critical_turnaround(ctx: &EvaluationContext<'_>) -> bool {
    let window = TimeDelta::hours(FAST_CRITICAL_WINDOW_HOURS);
    ctx.approved_with(Priority::Critical)
        .filter_map(valid_duration)
        .any(|duration| duration <= window)
}

/// At least 50 items that took strictly longer than 7 days.
#[must_use]
pub fn long_haul(ctx: &EvaluationContext<'_>) -> bool {
    let threshold = TimeDelta::days(LONG_HAUL_DAYS);
    let long = ctx
        .snapshots
        .iter()
        .filter_map(valid_duration)
        .filter(|duration| *duration > threshold)
        .count();
    long >= LONG_HAUL_MIN
}
