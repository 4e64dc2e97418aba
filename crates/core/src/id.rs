//! Identifiers for achievements.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Unique identifier for an achievement.
///
/// Opaque and immutable. The `Ord` impl exists only so containers iterate and
/// serialize deterministically; ids carry no ordering meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AchievementId(String);

impl AchievementId {
    /// Create an id from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AchievementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for AchievementId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for AchievementId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AchievementId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for AchievementId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for AchievementId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
