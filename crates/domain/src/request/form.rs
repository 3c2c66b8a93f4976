//! Multipart form field type

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::id::generate_id;

/// A `multipart/form-data` field.
///
/// Follows the same retention rule as headers: disabled fields stay in the
/// request but contribute nothing to the encoded body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    /// Unique identifier for this field row
    pub id: Uuid,
    /// Whether this field is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Field name
    pub key: String,
    /// Field value
    #[serde(default)]
    pub value: String,
}

const fn default_enabled() -> bool {
    true
}

impl FormField {
    /// Creates a new enabled field.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            enabled: true,
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a new disabled field.
    #[must_use]
    pub fn disabled(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            enabled: false,
            ..Self::new(key, value)
        }
    }
}

impl Default for FormField {
    fn default() -> Self {
        Self::new("", "")
    }
}
