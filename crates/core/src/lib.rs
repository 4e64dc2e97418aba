//! Achievement core data models.
//!
//! Identifiers, definitions, the persisted containers a save file carries,
//! the progress policy, and the merge algebra used to reconcile divergent
//! copies of that state.

#![warn(missing_docs)]

mod id;
mod definition;
mod state;
mod error;

pub mod merge;
pub mod policy;

pub use id::AchievementId;
pub use definition::AchievementDefinition;
pub use state::{UnlockedSet, ProgressMap, PersistedSnapshot};
pub use error::{AchievementError, Result};
pub use merge::{JoinSemilattice, Bottom, merge_unlocked, merge_progress, merge_all};
pub use policy::PolicyMode;
