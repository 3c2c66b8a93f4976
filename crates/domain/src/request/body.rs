//! HTTP Request body kind

use serde::{Deserialize, Serialize};

/// Which of the stored bodies a request sends.
///
/// A request keeps both its raw text and its form fields; the kind selects
/// which one is used, and only for methods that send a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    /// Raw text body (JSON, XML, plain text...)
    #[default]
    Raw,
    /// Multipart form data
    FormData,
}

impl BodyKind {
    /// Returns a human-readable label for the kind.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Raw => "Raw",
            Self::FormData => "Form Data",
        }
    }
}
