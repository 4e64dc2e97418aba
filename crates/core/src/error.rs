//! Error types for achievement operations.

use crate::id::AchievementId;

/// Result alias for achievement operations.
pub type Result<T> = std::result::Result<T, AchievementError>;

/// Errors that can occur while updating achievement state.
#[derive(Debug, thiserror::Error)]
pub enum AchievementError {
    /// Progress was reported for an achievement registered without `stat_max`
    #[error("progress reported for {0}, which was never registered with stat_max")]
    MisconfiguredAchievement(AchievementId),

    /// A backend failed to carry out an operation
    #[error("backend {backend} failed: {reason}")]
    BackendFailure {
        /// Name of the failing backend
        backend: String,
        /// What went wrong
        reason: String,
    },
}

impl AchievementError {
    /// Build a backend failure from anything displayable.
    pub fn backend(backend: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::BackendFailure {
            backend: backend.into(),
            reason: reason.to_string(),
        }
    }
}
