//! Progress update and auto-grant policy.

use serde::{Deserialize, Serialize};

/// How progress reported for an achievement without a threshold is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyMode {
    /// Report it as an error, to catch authoring mistakes during development
    Strict,
    /// Record the value and carry on; a player's session never breaks over it
    Permissive,
}

impl Default for PolicyMode {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            PolicyMode::Strict
        } else {
            PolicyMode::Permissive
        }
    }
}

/// New progress value to store, or `None` if `completed` would not raise it.
///
/// Progress only moves forward through this path; lowering it takes an
/// explicit clear.
pub fn advance(current: Option<u64>, completed: u64) -> Option<u64> {
    if current.unwrap_or(0) >= completed {
        None
    } else {
        Some(completed)
    }
}

/// Whether `completed` units satisfy a threshold of `stat_max`.
pub fn reaches_threshold(completed: u64, stat_max: u64) -> bool {
    completed >= stat_max
}
