//! Snapshot storage abstraction.

use achieve_core::{JoinSemilattice, PersistedSnapshot};
use async_trait::async_trait;

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Save written by a newer format than this build understands
    #[error("unsupported save version {found} (newest supported is {supported})")]
    Version {
        /// Version found in the file
        found: u32,
        /// Newest version this build reads
        supported: u32,
    },

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Host-side persistence for achievement state.
///
/// The core never decides how state reaches disk; a store does. Whatever the
/// format, combining the stored copy with a live one goes through the join
/// in [`achieve_core::merge`].
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the stored snapshot, or `None` if nothing has been saved yet.
    async fn load(&self) -> Result<Option<PersistedSnapshot>>;

    /// Replace the stored snapshot.
    async fn save(&mut self, snapshot: &PersistedSnapshot) -> Result<()>;

    /// Combine `snapshot` with the stored copy, save and return the result.
    async fn reconcile(&mut self, snapshot: &PersistedSnapshot) -> Result<PersistedSnapshot> {
        let merged = match self.load().await? {
            Some(stored) => stored.join(snapshot),
            None => snapshot.clone(),
        };
        self.save(&merged).await?;
        Ok(merged)
    }
}
