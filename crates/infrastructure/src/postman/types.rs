//! Postman Collection v2.1 Types
//!
//! Serde types for the subset of the Postman Collection v2.1 format that
//! Postline reads and writes. Unknown fields are ignored on input.

use serde::{Deserialize, Serialize};

/// Schema URL written into exported collections.
pub const COLLECTION_SCHEMA_V21: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// Root structure of a Postman Collection v2.1 file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostmanCollection {
    /// Collection metadata
    pub info: PostmanInfo,
    /// Top-level items (folders or requests)
    #[serde(default)]
    pub item: Vec<PostmanItem>,
}

/// Collection metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostmanInfo {
    /// Postman's internal collection id
    #[serde(
        rename = "_postman_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub postman_id: Option<String>,
    /// Collection name
    #[serde(default)]
    pub name: String,
    /// Schema URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}

/// A collection item: a folder when `item` is present, otherwise a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostmanItem {
    /// Item name
    #[serde(default)]
    pub name: String,
    /// Nested items (only present for folders)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Vec<Self>>,
    /// Request definition (only present for requests)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<PostmanRequest>,
}

/// Request definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostmanRequest {
    /// HTTP method
    #[serde(default = "default_method")]
    pub method: String,
    /// Request headers
    #[serde(default)]
    pub header: Vec<PostmanHeader>,
    /// Request body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<PostmanBody>,
    /// Request URL (string or structured object)
    #[serde(default)]
    pub url: PostmanUrl,
}

fn default_method() -> String {
    "GET".to_string()
}

/// URL can be a plain string or a structured object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum PostmanUrl {
    /// Missing or null URL
    #[default]
    Empty,
    /// Simple URL string
    Simple(String),
    /// Structured URL object
    Structured(PostmanUrlObject),
}

/// Structured URL object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PostmanUrlObject {
    /// Raw URL string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    /// Host segments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub host: Vec<String>,
    /// Path segments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
}

impl PostmanUrl {
    /// Builds a URL object that only carries the raw string.
    #[must_use]
    pub fn raw(url: impl Into<String>) -> Self {
        Self::Structured(PostmanUrlObject {
            raw: Some(url.into()),
            ..PostmanUrlObject::default()
        })
    }

    /// Returns the raw URL string.
    ///
    /// Structured URLs without `raw` are rebuilt from their host and path
    /// segments.
    #[must_use]
    pub fn to_raw(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Simple(url) => url.clone(),
            Self::Structured(obj) => obj.raw.clone().unwrap_or_else(|| {
                let host = obj.host.join(".");
                if obj.path.is_empty() {
                    host
                } else {
                    format!("{host}/{}", obj.path.join("/"))
                }
            }),
        }
    }
}

/// Header entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostmanHeader {
    /// Header name
    pub key: String,
    /// Header value
    #[serde(default)]
    pub value: String,
    /// Whether the header is disabled
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
}

/// Request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PostmanBody {
    /// Body mode: raw, formdata, urlencoded, file, graphql
    #[serde(default)]
    pub mode: String,
    /// Raw body content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    /// Multipart form parameters
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formdata: Vec<PostmanFormDataParam>,
}

/// Multipart form parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostmanFormDataParam {
    /// Field name
    pub key: String,
    /// Field value (text fields only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Field type: text or file
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    /// Whether the field is disabled
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
}

impl PostmanFormDataParam {
    /// Returns true if this parameter uploads a file.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.param_type.as_deref() == Some("file")
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}
