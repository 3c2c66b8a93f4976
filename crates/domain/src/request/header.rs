//! HTTP Header types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::id::generate_id;

/// A single HTTP header row with key, value, and enabled flag.
///
/// Disabled headers are kept in the request so the user can toggle them
/// back on, but they are never sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Unique identifier for this header row
    pub id: Uuid,
    /// The header name (e.g., "Content-Type")
    pub key: String,
    /// The header value, may contain `{{variable}}` placeholders
    pub value: String,
    /// Whether this header is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

impl Header {
    /// Creates a new enabled header.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }

    /// Creates a new disabled header.
    #[must_use]
    pub fn disabled(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            enabled: false,
            ..Self::new(key, value)
        }
    }

    /// Returns true if this header's key matches `name`, ignoring ASCII case.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.key.eq_ignore_ascii_case(name)
    }
}
