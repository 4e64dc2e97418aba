//! Achievement registry.
//!
//! Fans every public operation out to the local persisted store first and then
//! to each external backend in registration order. A failing backend is logged
//! and skipped; it never stops the others or the local update.

use achieve_core::{
    AchievementDefinition, AchievementError, AchievementId, PersistedSnapshot, Result,
};
use achieve_storage::{Backend, BackendConfig, PersistentBackend};
use tracing::{debug, info, warn};

use crate::sync::{SyncProbe, SyncReport};

/// Ordered set of backends behind the public achievement API.
pub struct AchievementRegistry {
    local: PersistentBackend,
    backends: Vec<Box<dyn Backend>>,
}

impl AchievementRegistry {
    /// Create a registry with empty persisted state and no external backends.
    pub fn new() -> Self {
        Self::with_local(PersistentBackend::new())
    }

    /// Create a registry over an existing persisted store.
    pub fn with_local(local: PersistentBackend) -> Self {
        Self {
            local,
            backends: Vec::new(),
        }
    }

    /// Set the persisted store's configuration.
    pub fn with_config(mut self, config: BackendConfig) -> Self {
        self.local = std::mem::take(&mut self.local).with_config(config);
        self
    }

    /// Append an external backend.
    pub fn with_backend(mut self, backend: impl Backend + 'static) -> Self {
        self.add_backend(Box::new(backend));
        self
    }

    /// Append an external backend.
    pub fn add_backend(&mut self, backend: Box<dyn Backend>) {
        debug!("Adding achievement backend {}", backend.name());
        self.backends.push(backend);
    }

    /// Number of active backends, the persisted store included.
    pub fn backend_count(&self) -> usize {
        1 + self.backends.len()
    }

    /// The persisted store.
    pub fn local(&self) -> &PersistentBackend {
        &self.local
    }

    /// Declare an achievement on every backend.
    pub fn register(&mut self, definition: &AchievementDefinition) {
        let _ = self.fan_out("register", |backend| backend.register(definition));
    }

    /// Unlock an achievement on every backend.
    pub fn grant(&mut self, id: &AchievementId) {
        let _ = self.fan_out("grant", |backend| backend.grant(id));
    }

    /// Remove an unlock and its progress on every backend.
    pub fn clear(&mut self, id: &AchievementId) {
        let _ = self.fan_out("clear", |backend| backend.clear(id));
    }

    /// Remove every unlock and all progress on every backend.
    pub fn clear_all(&mut self) {
        let _ = self.fan_out("clear_all", |backend| backend.clear_all());
    }

    /// Report progress toward an achievement.
    ///
    /// Does nothing once the achievement is unlocked anywhere. A missing
    /// threshold is reported as an error only when the persisted store is
    /// configured strict, and only after every backend has been called.
    pub fn progress(&mut self, id: &AchievementId, completed: u64) -> Result<()> {
        if self.has(id) {
            return Ok(());
        }
        self.fan_out("progress", |backend| backend.progress(id, completed))
    }

    /// Progress recorded in the persisted store, 0 if none.
    pub fn get_progress(&self, id: &AchievementId) -> u64 {
        self.local.get_progress(id)
    }

    /// Whether any backend considers the achievement unlocked.
    pub fn has(&self, id: &AchievementId) -> bool {
        self.local.has(id) || self.backends.iter().any(|backend| backend.has(id))
    }

    /// Probe for backends missing persisted unlocks.
    pub fn probe(&self) -> SyncProbe<'_> {
        SyncProbe::new(self.local.unlocked(), &self.backends)
    }

    /// Whether some backend lags behind the persisted unlocks.
    pub fn needs_sync(&self) -> bool {
        self.probe().needs_sync()
    }

    /// Grant every persisted unlock to each backend that does not have it.
    pub fn sync(&mut self) -> SyncReport {
        let mut report = SyncReport::default();
        let unlocked: Vec<AchievementId> = self.local.unlocked().iter().cloned().collect();

        for id in &unlocked {
            for backend in self.backends.iter_mut().filter(|b| !b.has(id)) {
                match backend.grant(id) {
                    Ok(()) => report.pushed += 1,
                    Err(e) => {
                        warn!("Sync of {} to {} failed: {}", id, backend.name(), e);
                        report.failed += 1;
                    }
                }
            }
        }

        info!(
            pushed = report.pushed,
            failed = report.failed,
            "Achievement sync finished"
        );
        report
    }

    /// Copy of the persisted containers, for saving.
    pub fn snapshot(&self) -> PersistedSnapshot {
        self.local.snapshot()
    }

    /// Replace persisted state, e.g. after loading a save.
    pub fn restore(&mut self, snapshot: PersistedSnapshot) {
        self.local.restore(snapshot);
    }

    /// Join another snapshot into persisted state. Grants nothing.
    pub fn merge_snapshot(&mut self, other: &PersistedSnapshot) {
        self.local.absorb(other);
    }

    fn fan_out<F>(&mut self, op: &str, mut f: F) -> Result<()>
    where
        F: FnMut(&mut dyn Backend) -> Result<()>,
    {
        let mut outcome = Ok(());

        match f(&mut self.local) {
            Ok(()) => {}
            Err(e @ AchievementError::MisconfiguredAchievement(_)) => outcome = Err(e),
            Err(e) => warn!("{} failed on {}: {}", op, self.local.name(), e),
        }

        for backend in self.backends.iter_mut() {
            if let Err(e) = f(backend.as_mut()) {
                warn!("{} failed on {}: {}", op, backend.name(), e);
            }
        }

        outcome
    }
}

impl Default for AchievementRegistry {
    fn default() -> Self {
        Self::new()
    }
}
