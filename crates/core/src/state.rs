//! Persisted achievement containers.
//!
//! These are the two slots a save file carries: the set of unlocked ids and
//! the per-id progress counters. Both are plain data; all policy lives in the
//! backend that mutates them and in [`crate::merge`].

use crate::id::AchievementId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Set of achievements currently granted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnlockedSet(pub(crate) BTreeSet<AchievementId>);

impl UnlockedSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an id. Returns true if it was not already present.
    pub fn insert(&mut self, id: AchievementId) -> bool {
        self.0.insert(id)
    }

    /// Remove an id. Returns true if it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        self.0.remove(id)
    }

    /// Membership test.
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    /// Remove every id.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Number of unlocked ids.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is unlocked.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate ids in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &AchievementId> {
        self.0.iter()
    }
}

impl FromIterator<AchievementId> for UnlockedSet {
    fn from_iter<I: IntoIterator<Item = AchievementId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a UnlockedSet {
    type Item = &'a AchievementId;
    type IntoIter = std::collections::btree_set::Iter<'a, AchievementId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Completed units per progress-tracked achievement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressMap(pub(crate) BTreeMap<AchievementId, u64>);

impl ProgressMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded progress, treating a missing id as 0.
    pub fn get(&self, id: &str) -> u64 {
        self.0.get(id).copied().unwrap_or(0)
    }

    /// Recorded progress, or `None` when nothing was ever recorded.
    pub fn entry_value(&self, id: &str) -> Option<u64> {
        self.0.get(id).copied()
    }

    /// Overwrite the value for an id.
    pub fn set(&mut self, id: AchievementId, completed: u64) {
        self.0.insert(id, completed);
    }

    /// Drop the entry for an id.
    pub fn remove(&mut self, id: &str) -> Option<u64> {
        self.0.remove(id)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Number of tracked ids.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no progress is recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(id, completed)` pairs in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (&AchievementId, u64)> {
        self.0.iter().map(|(id, v)| (id, *v))
    }
}

impl FromIterator<(AchievementId, u64)> for ProgressMap {
    fn from_iter<I: IntoIterator<Item = (AchievementId, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The pair of containers a save file or sync payload carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSnapshot {
    /// Granted achievements
    #[serde(default)]
    pub unlocked: UnlockedSet,

    /// Progress counters
    #[serde(default)]
    pub progress: ProgressMap,
}

impl PersistedSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the snapshot holds no unlocks and no progress.
    pub fn is_empty(&self) -> bool {
        self.unlocked.is_empty() && self.progress.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_missing_is_zero() {
        let map = ProgressMap::new();
        assert_eq!(map.get("anything"), 0);
        assert_eq!(map.entry_value("anything"), None);
    }

    #[test]
    fn test_unlocked_insert_is_idempotent() {
        let mut set = UnlockedSet::new();
        assert!(set.insert("a".into()));
        assert!(!set.insert("a".into()));
        assert_eq!(set.len(), 1);
        assert!(set.remove("a"));
        assert!(!set.remove("a"));
    }

    #[test]
    fn test_snapshot_slot_names() {
        let snapshot = PersistedSnapshot {
            unlocked: [AchievementId::new("b")].into_iter().collect(),
            progress: [(AchievementId::new("a"), 4)].into_iter().collect(),
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json, serde_json::json!({"unlocked": ["b"], "progress": {"a": 4}}));

        let empty: PersistedSnapshot = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }
}
