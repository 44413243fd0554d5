//! Per-item auxiliary facts consulted by activity rules.
//!
//! Rules never reach into storage. Whoever builds the evaluation context
//! resolves these facts up front (see `kudos-engine`) and hands them in
//! through [`AuxiliaryLookup`].

use std::collections::HashSet;

use kudos_core::model::TaskId;

/// Answers per-item questions that are not part of the snapshot itself.
pub trait AuxiliaryLookup: Send + Sync {
    /// Does the item have at least one comment or annotation?
    fn has_comment(&self, task: &TaskId) -> bool;

    /// Did the item pass through a cancelled or rejected state before approval?
    fn was_cancelled(&self, task: &TaskId) -> bool;
}

/// Lookup backed by pre-resolved id sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefetchedFlags {
    commented: HashSet<TaskId>,
    cancelled: HashSet<TaskId>,
}

impl PrefetchedFlags {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_commented(&mut self, task: TaskId) {
        self.commented.insert(task);
    }

    pub fn mark_cancelled(&mut self, task: TaskId) {
        self.cancelled.insert(task);
    }

    #[must_use]
    pub fn with_commented(mut self, tasks: impl IntoIterator<Item = TaskId>) -> Self {
        self.commented.extend(tasks);
        self
    }

    #[must_use]
    pub fn with_cancelled(mut self, tasks: impl IntoIterator<Item = TaskId>) -> Self {
        self.cancelled.extend(tasks);
        self
    }

    #[must_use]
    pub fn commented_count(&self) -> usize {
        self.commented.len()
    }

    #[must_use]
    pub fn cancelled_count(&self) -> usize {
        self.cancelled.len()
    }
}

impl AuxiliaryLookup for PrefetchedFlags {
    fn has_comment(&self, task: &TaskId) -> bool {
        self.commented.contains(task)
    }

    fn was_cancelled(&self, task: &TaskId) -> bool {
        self.cancelled.contains(task)
    }
}

/// Lookup that reports no comments and no cancellations for any item.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoActivity;

impl AuxiliaryLookup for NoActivity {
    fn has_comment(&self, _task: &TaskId) -> bool {
        false
    }

    fn was_cancelled(&self, _task: &TaskId) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::{AuxiliaryLookup, NoActivity, PrefetchedFlags};
    use kudos_core::model::TaskId;

    fn id(raw: &str) -> TaskId {
        TaskId::parse(raw).expect("id")
    }

    #[test]
    fn prefetched_flags_are_independent() {
        let flags = PrefetchedFlags::new()
            .with_commented([id("a"), id("b")])
            .with_cancelled([id("b")]);

        assert!(flags.has_comment(&id("a")));
        assert!(!flags.was_cancelled(&id("a")));
        assert!(flags.was_cancelled(&id("b")));
        assert!(!flags.has_comment(&id("c")));
        assert_eq!(flags.commented_count(), 2);
        assert_eq!(flags.cancelled_count(), 1);
    }

    #[test]
    fn no_activity_is_always_false() {
        assert!(!NoActivity.has_comment(&id("a")));
        assert!(!NoActivity.was_cancelled(&id("a")));
    }
}
