//! Read-side collaborator contracts.
//!
//! The engine never owns task or comment persistence. It consumes these
//! three narrow interfaces and propagates their failures unchanged.

use kudos_core::ErrorCode;
use kudos_core::model::{ProjectId, TaskId, TaskSnapshot, TeamId, UserId};

/// Failure reported by a collaborator.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),

    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("corrupt task row '{task}': {reason}")]
    Corrupt { task: String, reason: String },
}

impl SourceError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Unavailable(_) => ErrorCode::SourceUnavailable,
            Self::Query(_) => ErrorCode::SourceQueryFailed,
            Self::Corrupt { .. } => ErrorCode::CorruptSnapshot,
        }
    }

    /// Whether retrying the same call could succeed.
    ///
    /// `SQLITE_BUSY`/`SQLITE_LOCKED` count as transient; schema or data
    /// problems do not.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Unavailable(_) => true,
            Self::Query(rusqlite::Error::SqliteFailure(failure, _)) => matches!(
                failure.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            ),
            Self::Query(_) | Self::Corrupt { .. } => false,
        }
    }
}

/// Every completed work item assigned to a user.
pub trait SnapshotSource: Send + Sync {
    /// Return only items in a terminal approved state. Order is irrelevant.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the backing store cannot answer.
    fn fetch_completed_snapshots(
        &self,
        user: &UserId,
        project: &ProjectId,
        team: &TeamId,
    ) -> Result<Vec<TaskSnapshot>, SourceError>;
}

/// Comment existence per work item.
pub trait CommentSource: Send + Sync {
    /// # Errors
    ///
    /// Returns [`SourceError`] when the backing store cannot answer.
    fn has_associated_comment(&self, task: &TaskId) -> Result<bool, SourceError>;
}

/// Cancellation history per work item.
pub trait CancellationSource: Send + Sync {
    /// True if the item was cancelled or rejected at any point before approval.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the backing store cannot answer.
    fn was_ever_cancelled(&self, task: &TaskId) -> Result<bool, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::SourceError;
    use kudos_core::ErrorCode;

    fn sqlite_failure(code: std::os::raw::c_int) -> SourceError {
        SourceError::Query(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(code),
            None,
        ))
    }

    #[test]
    fn busy_and_locked_are_transient() {
        assert!(sqlite_failure(rusqlite::ffi::SQLITE_BUSY).is_transient());
        assert!(sqlite_failure(rusqlite::ffi::SQLITE_LOCKED).is_transient());
        assert!(!sqlite_failure(rusqlite::ffi::SQLITE_CORRUPT).is_transient());
    }

    #[test]
    fn unavailable_is_transient_and_corrupt_is_not() {
        assert!(SourceError::Unavailable("down".into()).is_transient());
        let corrupt = SourceError::Corrupt {
            task: "t-1".into(),
            reason: "bad priority".into(),
        };
        assert!(!corrupt.is_transient());
        assert_eq!(corrupt.code(), ErrorCode::CorruptSnapshot);
    }
}
