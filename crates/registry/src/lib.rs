//! Achievement registry (fan-out layer)
//!
//! Public achievement operations, forwarded to every active backend, plus
//! detection and repair of backends that fell behind the persisted unlocks.

#![warn(missing_docs)]

pub mod registry;
pub mod sync;

pub use registry::AchievementRegistry;
pub use sync::{SyncProbe, SyncReport};
