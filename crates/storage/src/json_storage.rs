//! JSON file snapshot store.
//!
//! Keeps one snapshot per file, wrapped in a small envelope carrying a format
//! version and the time it was written. Writes go to a sibling temp file that
//! is then renamed over the target, so a crash mid-write leaves the previous
//! save intact.

use std::path::{Path, PathBuf};

use achieve_core::PersistedSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info};

use super::{Result, SnapshotStore, StorageError};

/// Newest envelope version this build writes and reads.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    version: u32,
    saved_at: DateTime<Utc>,
    snapshot: PersistedSnapshot,
}

/// File-based JSON snapshot store.
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    /// Create a store for `path`, creating its parent directory if needed.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        Ok(Self { path })
    }

    /// Path of the save file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait::async_trait]
impl SnapshotStore for JsonSnapshotStore {
    async fn load(&self) -> Result<Option<PersistedSnapshot>> {
        let Some(envelope) = read_json::<Envelope>(&self.path).await? else {
            debug!("No save at {}", self.path.display());
            return Ok(None);
        };
        if envelope.version > FORMAT_VERSION {
            return Err(StorageError::Version {
                found: envelope.version,
                supported: FORMAT_VERSION,
            });
        }
        info!(
            "Loaded {} unlocks from {} (saved {})",
            envelope.snapshot.unlocked.len(),
            self.path.display(),
            envelope.saved_at
        );
        Ok(Some(envelope.snapshot))
    }

    async fn save(&mut self, snapshot: &PersistedSnapshot) -> Result<()> {
        let envelope = Envelope {
            version: FORMAT_VERSION,
            saved_at: Utc::now(),
            snapshot: snapshot.clone(),
        };
        let json = serde_json::to_string_pretty(&envelope)?;

        let tmp = self.tmp_path();
        fs::write(&tmp, json.as_bytes()).await?;
        fs::rename(&tmp, &self.path).await?;

        debug!("Saved snapshot to {}", self.path.display());
        Ok(())
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use achieve_core::AchievementId;

    fn snapshot(unlocked: &[&str], progress: &[(&str, u64)]) -> PersistedSnapshot {
        PersistedSnapshot {
            unlocked: unlocked.iter().map(|id| AchievementId::new(*id)).collect(),
            progress: progress
                .iter()
                .map(|(id, v)| (AchievementId::new(*id), *v))
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSnapshotStore::new(dir.path().join("save.json")).await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonSnapshotStore::new(dir.path().join("nested").join("save.json"))
            .await
            .unwrap();

        let saved = snapshot(&["b"], &[("a", 4)]);
        store.save(&saved).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, saved);
        assert!(!store.tmp_path().exists());
    }

    #[tokio::test]
    async fn test_reconcile_joins_with_stored_copy() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonSnapshotStore::new(dir.path().join("save.json")).await.unwrap();

        store.save(&snapshot(&["b"], &[("a", 7)])).await.unwrap();
        let merged = store.reconcile(&snapshot(&["c"], &[("a", 4), ("d", 1)])).await.unwrap();

        assert_eq!(merged, snapshot(&["b", "c"], &[("a", 7), ("d", 1)]));
        assert_eq!(store.load().await.unwrap().unwrap(), merged);
    }

    #[tokio::test]
    async fn test_reconcile_without_stored_copy() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonSnapshotStore::new(dir.path().join("save.json")).await.unwrap();

        let live = snapshot(&["x"], &[]);
        assert_eq!(store.reconcile(&live).await.unwrap(), live);
        assert_eq!(store.load().await.unwrap().unwrap(), live);
    }

    #[tokio::test]
    async fn test_newer_version_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        let json = serde_json::json!({
            "version": FORMAT_VERSION + 1,
            "saved_at": Utc::now(),
            "snapshot": {"unlocked": [], "progress": {}},
        });
        std::fs::write(&path, json.to_string()).unwrap();

        let store = JsonSnapshotStore::new(&path).await.unwrap();
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StorageError::Version { found, .. } if found == FORMAT_VERSION + 1));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonSnapshotStore::new(&path).await.unwrap();
        assert!(matches!(store.load().await, Err(StorageError::Json(_))));
    }
}
