//! Persisted-state backend.
//!
//! Owns the two containers that end up in a save file and applies the
//! progress policy: progress only moves forward, and reaching a registered
//! threshold grants the achievement.

use std::collections::HashMap;

use achieve_core::{
    policy, AchievementDefinition, AchievementError, AchievementId, JoinSemilattice,
    PersistedSnapshot, PolicyMode, ProgressMap, Result, UnlockedSet,
};
use tracing::debug;

use crate::Backend;

/// Configuration for the persistent backend.
#[derive(Debug, Clone, Default)]
pub struct BackendConfig {
    /// What to do with progress for an achievement that has no threshold
    pub mode: PolicyMode,
}

/// Backend over the persisted unlocked set and progress map.
#[derive(Debug, Default)]
pub struct PersistentBackend {
    state: PersistedSnapshot,
    stat_max: HashMap<AchievementId, u64>,
    config: BackendConfig,
}

impl PersistentBackend {
    /// Create a backend with empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend over previously saved state.
    pub fn from_snapshot(snapshot: PersistedSnapshot) -> Self {
        Self {
            state: snapshot,
            ..Self::default()
        }
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: BackendConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Copy of the persisted containers.
    pub fn snapshot(&self) -> PersistedSnapshot {
        self.state.clone()
    }

    /// Replace the persisted containers wholesale, e.g. after loading a save.
    pub fn restore(&mut self, snapshot: PersistedSnapshot) {
        self.state = snapshot;
    }

    /// Join another snapshot into the local one.
    ///
    /// Pure merge: ids whose merged progress reaches their threshold are not
    /// granted here.
    pub fn absorb(&mut self, other: &PersistedSnapshot) {
        self.state = self.state.join(other);
        debug!(
            unlocked = self.state.unlocked.len(),
            tracked = self.state.progress.len(),
            "Merged snapshot into persisted state"
        );
    }

    /// Granted achievements.
    pub fn unlocked(&self) -> &UnlockedSet {
        &self.state.unlocked
    }

    /// Recorded progress.
    pub fn progress_map(&self) -> &ProgressMap {
        &self.state.progress
    }

    /// Recorded progress for an id, 0 if none.
    pub fn get_progress(&self, id: &AchievementId) -> u64 {
        self.state.progress.get(id.as_str())
    }

    /// Registered threshold for an id.
    pub fn stat_max(&self, id: &AchievementId) -> Option<u64> {
        self.stat_max.get(id).copied()
    }
}

impl Backend for PersistentBackend {
    fn name(&self) -> &str {
        "persistent"
    }

    fn register(&mut self, definition: &AchievementDefinition) -> Result<()> {
        if let Some(stat_max) = definition.stat_max {
            self.stat_max.insert(definition.id.clone(), stat_max);
        }
        Ok(())
    }

    fn grant(&mut self, id: &AchievementId) -> Result<()> {
        if self.state.unlocked.insert(id.clone()) {
            debug!("Granted achievement {}", id);
        }
        Ok(())
    }

    fn clear(&mut self, id: &AchievementId) -> Result<()> {
        self.state.unlocked.remove(id.as_str());
        self.state.progress.remove(id.as_str());
        Ok(())
    }

    fn clear_all(&mut self) -> Result<()> {
        self.state.unlocked.clear();
        self.state.progress.clear();
        Ok(())
    }

    fn progress(&mut self, id: &AchievementId, completed: u64) -> Result<()> {
        let current = self.state.progress.entry_value(id.as_str());
        let Some(next) = policy::advance(current, completed) else {
            return Ok(());
        };
        self.state.progress.set(id.clone(), next);

        let Some(stat_max) = self.stat_max(id) else {
            return match self.config.mode {
                PolicyMode::Strict => Err(AchievementError::MisconfiguredAchievement(id.clone())),
                PolicyMode::Permissive => {
                    debug!("Progress for {} has no stat_max, not granting", id);
                    Ok(())
                }
            };
        };

        if policy::reaches_threshold(next, stat_max) {
            debug!("Achievement {} reached {}/{}", id, next, stat_max);
            self.grant(id)?;
        }
        Ok(())
    }

    fn has(&self, id: &AchievementId) -> bool {
        self.state.unlocked.contains(id.as_str())
    }
}
