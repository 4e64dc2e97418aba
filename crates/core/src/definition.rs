//! Achievement definition - what gets registered at startup.

use crate::id::AchievementId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Declares an achievement and, optionally, the progress needed to unlock it.
///
/// Definitions are rebuilt every run from registration calls and are never
/// persisted with the player's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementDefinition {
    /// Achievement identifier
    pub id: AchievementId,

    /// Completion threshold for progress-tracked achievements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat_max: Option<u64>,

    /// Backend-specific settings. Backends read the keys they understand and
    /// ignore the rest.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, serde_json::Value>,
}

impl AchievementDefinition {
    /// Create a definition with no progress threshold.
    pub fn new(id: impl Into<AchievementId>) -> Self {
        Self {
            id: id.into(),
            stat_max: None,
            options: BTreeMap::new(),
        }
    }

    /// Set the completion threshold.
    pub fn with_stat_max(mut self, stat_max: u64) -> Self {
        self.stat_max = Some(stat_max);
        self
    }

    /// Attach a backend-specific option.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Look up a backend-specific option.
    pub fn option(&self, key: &str) -> Option<&serde_json::Value> {
        self.options.get(key)
    }
}
