//! Rules comparing the approval instant with the due instant.
//!
//! Only items carrying both instants are eligible. An item without a due
//! date is neither on time nor late.

use chrono::TimeDelta;
use kudos_core::model::TaskSnapshot;

use super::{DEADLINE_DISCIPLINE_MIN, NEAR_MISS_WINDOW_MINUTES, ON_TIME_RATE_MIN_PERCENT};
use crate::aggregate::ratio;
use crate::context::EvaluationContext;

/// At least 20 items approved strictly before their due instant.
#[must_use]
pub fn deadline_discipline(ctx: &EvaluationContext<'_>) -> bool {
    let early = ctx
        .snapshots
        .iter()
        .filter_map(TaskSnapshot::deadline_slack)
        .filter(|slack| *slack > TimeDelta::zero())
        .count();
    early >= DEADLINE_DISCIPLINE_MIN
}

/// At least 90% of dated items approved at or before their due instant.
#[must_use]
pub fn on_time_rate(ctx: &EvaluationContext<'_>) -> bool {
    let mut eligible = 0;
    let mut on_time = 0;
    for slack in ctx.snapshots.iter().filter_map(TaskSnapshot::deadline_slack) {
        eligible += 1;
        if slack >= TimeDelta::zero() {
            on_time += 1;
        }
    }

    if eligible == 0 {
        return false;
    }
    ratio(on_time, eligible) >= ON_TIME_RATE_MIN_PERCENT
}

/// Some item approved no more than 5 minutes before its due instant.
///
/// Late approvals never count, however small the overrun.
#[must_use]
pub fn near_miss_save(ctx: &EvaluationContext<'_>) -> bool {
    let window = TimeDelta::minutes(NEAR_MISS_WINDOW_MINUTES);
    ctx.snapshots
        .iter()
        .filter_map(TaskSnapshot::deadline_slack)
        .any(|slack| (TimeDelta::zero()..=window).contains(&slack))
}
