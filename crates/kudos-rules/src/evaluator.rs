use tracing::{debug, instrument, trace};

use crate::catalog::AchievementId;
use crate::context::EvaluationContext;
use crate::result::RuleResult;
use crate::rules::rule_for;

/// Decide a single achievement.
#[must_use]
pub fn evaluate_rule(id: AchievementId, ctx: &EvaluationContext<'_>) -> bool {
    let held = rule_for(id)(ctx);
    trace!(achievement = %id, held, "rule evaluated");
    held
}

/// Decide every catalogued achievement.
///
/// Rules run independently; no verdict short-circuits another. The result
/// always holds one entry per [`AchievementId::ALL`] member.
#[must_use]
#[instrument(skip_all, fields(snapshots = ctx.snapshots.len(), now = %ctx.now))]
pub fn evaluate_all(ctx: &EvaluationContext<'_>) -> RuleResult {
    let result: RuleResult = AchievementId::ALL
        .into_iter()
        .map(|id| (id, evaluate_rule(id, ctx)))
        .collect();

    debug!(
        unlocked = result.unlocked_count(),
        total = result.len(),
        "achievement evaluation complete"
    );
    result
}
