//! Plain filtered counts.

use std::collections::HashSet;

use kudos_core::model::Priority;

use super::{
    CENTURY_MIN, CRITICAL_VOLUME_MIN, FIRST_APPROVAL_MIN, HIGH_PRIORITY_MIN, TEAM_DIVERSITY_MIN,
};
use crate::context::EvaluationContext;

#[must_use]
pub fn first_approval(ctx: &EvaluationContext<'_>) -> bool {
    ctx.approved().count() >= FIRST_APPROVAL_MIN
}

#[must_use]
pub fn century(ctx: &EvaluationContext<'_>) -> bool {
    ctx.approved().count() >= CENTURY_MIN
}

/// At least 20 approved HIGH items. CRITICAL items do not count here.
#[must_use]
pub fn high_priority_volume(ctx: &EvaluationContext<'_>) -> bool {
    ctx.approved_with(Priority::High).count() >= HIGH_PRIORITY_MIN
}

#[must_use]
pub fn critical_volume(ctx: &EvaluationContext<'_>) -> bool {
    ctx.approved_with(Priority::Critical).count() >= CRITICAL_VOLUME_MIN
}

/// Approved items span at least 5 distinct teams.
#[must_use]
pub fn team_diversity(ctx: &EvaluationContext<'_>) -> bool {
    let teams: HashSet<_> = ctx.approved().map(|s| &s.team_id).collect();
    teams.len() >= TEAM_DIVERSITY_MIN
}
