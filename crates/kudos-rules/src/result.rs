use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::AchievementId;

/// Verdict of one evaluation run: every achievement mapped to a boolean.
///
/// Serialises as a flat JSON object keyed by achievement id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleResult(BTreeMap<AchievementId, bool>);

impl RuleResult {
    /// Verdict for one achievement (`None` if it was not evaluated).
    #[must_use]
    pub fn get(&self, id: AchievementId) -> Option<bool> {
        self.0.get(&id).copied()
    }

    /// True only when the achievement was evaluated and holds.
    #[must_use]
    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.get(id).unwrap_or(false)
    }

    /// Achievements that currently hold, in catalog order.
    pub fn unlocked(&self) -> impl Iterator<Item = AchievementId> + '_ {
        self.0.iter().filter(|(_, held)| **held).map(|(id, _)| *id)
    }

    #[must_use]
    pub fn unlocked_count(&self) -> usize {
        self.0.values().filter(|held| **held).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AchievementId, bool)> + '_ {
        self.0.iter().map(|(id, held)| (*id, *held))
    }
}

impl FromIterator<(AchievementId, bool)> for RuleResult {
    fn from_iter<T: IntoIterator<Item = (AchievementId, bool)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
