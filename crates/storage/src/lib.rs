//! Achievement backends and snapshot storage.
//!
//! This crate provides the [`Backend`] capability trait, the
//! [`PersistentBackend`] that owns the persisted containers, and a
//! trait-based snapshot store with a JSON file implementation.

#![warn(missing_docs)]

pub mod backend;
pub mod persistent;
pub mod trait_;
#[cfg(feature = "json")]
pub mod json_storage;

pub use backend::Backend;
pub use persistent::{BackendConfig, PersistentBackend};
pub use trait_::{SnapshotStore, StorageError, Result};
#[cfg(feature = "json")]
pub use json_storage::JsonSnapshotStore;
