//! Achievement backend abstraction.

use achieve_core::{AchievementDefinition, AchievementId, Result};

/// A target that achievement operations are reported to.
///
/// Every method has a default that does nothing (or answers `false` for
/// [`Backend::has`]), so a backend only overrides what it supports. Options in
/// an [`AchievementDefinition`] that a backend does not understand must be
/// ignored, never rejected.
pub trait Backend: Send {
    /// Name used in log output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Declare an achievement. Bookkeeping only; never grants.
    fn register(&mut self, _definition: &AchievementDefinition) -> Result<()> {
        Ok(())
    }

    /// Mark an achievement unlocked. Granting twice is not an error.
    fn grant(&mut self, _id: &AchievementId) -> Result<()> {
        Ok(())
    }

    /// Remove the unlock and any progress for an achievement.
    fn clear(&mut self, _id: &AchievementId) -> Result<()> {
        Ok(())
    }

    /// Remove every unlock and all progress.
    fn clear_all(&mut self) -> Result<()> {
        Ok(())
    }

    /// Report cumulative progress toward an achievement.
    fn progress(&mut self, _id: &AchievementId, _completed: u64) -> Result<()> {
        Ok(())
    }

    /// Whether this backend considers the achievement unlocked.
    fn has(&self, _id: &AchievementId) -> bool {
        false
    }
}
