//! Where decided results go.
//!
//! Persisting unlocked achievements and notifying users belong to the
//! caller. The engine hands each result to an [`AwardSink`] and moves on.

use kudos_core::ErrorCode;
use kudos_core::model::CompletionEvent;
use kudos_rules::RuleResult;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum AwardError {
    #[error("award sink unavailable: {0}")]
    Unavailable(String),

    #[error("award sink rejected result: {0}")]
    Rejected(String),
}

impl AwardError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        ErrorCode::AwardForwardFailed
    }

    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Receives every evaluation result produced by the trigger adapter.
pub trait AwardSink: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AwardError`] when the result could not be delivered.
    fn forward(&self, event: &CompletionEvent, result: &RuleResult) -> Result<(), AwardError>;
}

/// Sink that only logs unlocked achievements.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAwardSink;

impl AwardSink for TracingAwardSink {
    fn forward(&self, event: &CompletionEvent, result: &RuleResult) -> Result<(), AwardError> {
        let unlocked: Vec<&'static str> = result.unlocked().map(|id| id.as_str()).collect();
        info!(
            user = %event.user_id,
            task = %event.task_id,
            unlocked = unlocked.len(),
            achievements = ?unlocked,
            "achievements evaluated"
        );
        Ok(())
    }
}
