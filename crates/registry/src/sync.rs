//! Detecting backends that disagree with the persisted unlocks.

use achieve_core::{AchievementId, UnlockedSet};
use achieve_storage::Backend;
use serde::Serialize;

/// Read-only view comparing persisted unlocks against external backends.
pub struct SyncProbe<'a> {
    unlocked: &'a UnlockedSet,
    backends: &'a [Box<dyn Backend>],
}

impl<'a> SyncProbe<'a> {
    /// Create a probe over the persisted unlocks and the external backends.
    pub fn new(unlocked: &'a UnlockedSet, backends: &'a [Box<dyn Backend>]) -> Self {
        Self { unlocked, backends }
    }

    /// Whether any backend is missing an unlock the persisted state has.
    pub fn needs_sync(&self) -> bool {
        self.unlocked
            .iter()
            .any(|id| self.backends.iter().any(|backend| !backend.has(id)))
    }

    /// Names of backends that do not have `id` unlocked.
    pub fn lagging(&self, id: &AchievementId) -> Vec<&'a str> {
        self.backends
            .iter()
            .filter(|backend| !backend.has(id))
            .map(|backend| backend.name())
            .collect()
    }

    /// Every persisted unlock some backend is missing, with those backends.
    pub fn pending(&self) -> Vec<(&'a AchievementId, Vec<&'a str>)> {
        self.unlocked
            .iter()
            .map(|id| (id, self.lagging(id)))
            .filter(|(_, lagging)| !lagging.is_empty())
            .collect()
    }
}

/// Outcome of pushing persisted unlocks to lagging backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Grants delivered
    pub pushed: usize,
    /// Grants a backend refused
    pub failed: usize,
}

impl SyncReport {
    /// Whether every lagging backend accepted its grants.
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}
