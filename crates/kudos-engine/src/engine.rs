//! One evaluation run: fetch, resolve flags, decide.

use chrono::{FixedOffset, Offset, Utc};
use kudos_core::model::{CompletionEvent, ProjectId, TaskSnapshot, TeamId, UserId};
use kudos_core::{Clock, ErrorCode, SystemClock};
use kudos_rules::{EvaluationContext, PrefetchedFlags, RuleResult, evaluate_all};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::source::{CancellationSource, CommentSource, SnapshotSource, SourceError};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl EngineError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Source(err) => err.code(),
        }
    }

    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Source(err) => err.is_transient(),
        }
    }
}

/// Evaluates the full catalog for one user on demand.
///
/// Holds no per-user state between runs. Every call re-reads history and
/// the clock, so repeated calls with unchanged inputs give equal results.
#[derive(Clone)]
pub struct Engine {
    snapshots: Arc<dyn SnapshotSource>,
    comments: Arc<dyn CommentSource>,
    cancellations: Arc<dyn CancellationSource>,
    clock: Arc<dyn Clock>,
    zone: FixedOffset,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("zone", &self.zone)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Build an engine over separate collaborators, using the system clock
    /// and UTC calendar days.
    #[must_use]
    pub fn new(
        snapshots: Arc<dyn SnapshotSource>,
        comments: Arc<dyn CommentSource>,
        cancellations: Arc<dyn CancellationSource>,
    ) -> Self {
        Self {
            snapshots,
            comments,
            cancellations,
            clock: Arc::new(SystemClock),
            zone: Utc.fix(),
        }
    }

    /// Build an engine whose three collaborators are one store.
    #[must_use]
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: SnapshotSource + CommentSource + CancellationSource + 'static,
    {
        Self::new(store.clone(), store.clone(), store)
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Calendar zone used for day and month buckets.
    #[must_use]
    pub const fn with_zone(mut self, zone: FixedOffset) -> Self {
        self.zone = zone;
        self
    }

    #[must_use]
    pub const fn zone(&self) -> FixedOffset {
        self.zone
    }

    /// Decide every achievement for `user` from their full history.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Source`] if any collaborator fails. No partial
    /// result is produced.
    #[instrument(skip_all, fields(user = %user, project = %project, team = %team))]
    pub fn evaluate(
        &self,
        user: &UserId,
        project: &ProjectId,
        team: &TeamId,
    ) -> Result<RuleResult, EngineError> {
        let now = self.clock.now();
        let fetched = self
            .snapshots
            .fetch_completed_snapshots(user, project, team)?;
        let fetched_len = fetched.len();
        let snapshots = dedupe_by_id(fetched);
        if snapshots.len() != fetched_len {
            debug!(
                fetched = fetched_len,
                kept = snapshots.len(),
                "dropped duplicate snapshots"
            );
        }

        let flags = self.prefetch_flags(&snapshots)?;
        debug!(
            snapshots = snapshots.len(),
            commented = flags.commented_count(),
            cancelled = flags.cancelled_count(),
            "history loaded"
        );

        let ctx = EvaluationContext::new(&snapshots, now, self.zone, &flags);
        Ok(evaluate_all(&ctx))
    }

    /// Evaluate for the user named in a completion event.
    ///
    /// # Errors
    ///
    /// See [`Engine::evaluate`].
    pub fn evaluate_event(&self, event: &CompletionEvent) -> Result<RuleResult, EngineError> {
        self.evaluate(&event.user_id, &event.project_id, &event.team_id)
    }

    fn prefetch_flags(&self, snapshots: &[TaskSnapshot]) -> Result<PrefetchedFlags, SourceError> {
        let mut flags = PrefetchedFlags::new();
        for snapshot in snapshots {
            if self.comments.has_associated_comment(&snapshot.id)? {
                flags.mark_commented(snapshot.id.clone());
            }
            if self.cancellations.was_ever_cancelled(&snapshot.id)? {
                flags.mark_cancelled(snapshot.id.clone());
            }
        }
        Ok(flags)
    }
}

/// Keep the first snapshot seen for each task id.
fn dedupe_by_id(snapshots: Vec<TaskSnapshot>) -> Vec<TaskSnapshot> {
    let mut seen = HashSet::with_capacity(snapshots.len());
    snapshots
        .into_iter()
        .filter(|snapshot| seen.insert(snapshot.id.clone()))
        .collect()
}
