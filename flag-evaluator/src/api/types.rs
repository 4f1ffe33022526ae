use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reserved treatment meaning no valid decision could be made.
pub const CONTROL: &str = "control";

/// Caller supplied attributes, tested by attribute matchers.
pub type Attributes = HashMap<String, Value>;

/// Identifies the entity being evaluated.
///
/// The bucketing key only feeds the hash; matchers always see the matching key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Key {
    pub matching_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucketing_key: Option<String>,
}

impl Key {
    pub fn new(matching_key: impl Into<String>) -> Self {
        Key {
            matching_key: matching_key.into(),
            bucketing_key: None,
        }
    }

    pub fn with_bucketing_key(
        matching_key: impl Into<String>,
        bucketing_key: impl Into<String>,
    ) -> Self {
        Key {
            matching_key: matching_key.into(),
            bucketing_key: Some(bucketing_key.into()),
        }
    }

    /// The key used as hash input. Falls back to the matching key when no
    /// (or an empty) bucketing key was given.
    pub fn bucketing_key(&self) -> &str {
        match self.bucketing_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => &self.matching_key,
        }
    }
}

impl From<&str> for Key {
    fn from(matching_key: &str) -> Self {
        Key::new(matching_key)
    }
}

impl From<String> for Key {
    fn from(matching_key: String) -> Self {
        Key::new(matching_key)
    }
}
