//! Rules that depend on per-item comment and cancellation history.

use kudos_core::model::{Priority, TaskSnapshot};

use super::{BUG_FIXER_MIN, BUG_REPORTER_MIN, REJECTION_RECOVERY_MIN, REVIEW_RESOLVER_MIN};
use crate::context::EvaluationContext;

fn commented<'a>(
    ctx: &EvaluationContext<'a>,
    items: impl Iterator<Item = &'a TaskSnapshot>,
) -> usize {
    items.filter(|s| ctx.lookup.has_comment(&s.id)).count()
}

/// At least 10 approved items that had been cancelled or rejected before.
#[must_use]
pub fn rejection_recovery(ctx: &EvaluationContext<'_>) -> bool {
    let recovered = ctx
        .approved()
        .filter(|s| ctx.lookup.was_cancelled(&s.id))
        .count();
    recovered >= REJECTION_RECOVERY_MIN
}

/// At least 100 approved items with a comment.
#[must_use]
pub fn bug_fixer(ctx: &EvaluationContext<'_>) -> bool {
    commented(ctx, ctx.approved()) >= BUG_FIXER_MIN
}

/// At least 25 approved CRITICAL items with a comment.
#[must_use]
pub fn bug_reporter(ctx: &EvaluationContext<'_>) -> bool {
    commented(ctx, ctx.approved_with(Priority::Critical)) >= BUG_REPORTER_MIN
}

/// At least 30 approved items with a comment.
#[must_use]
pub fn review_resolver(ctx: &EvaluationContext<'_>) -> bool {
    commented(ctx, ctx.approved()) >= REVIEW_RESOLVER_MIN
}
