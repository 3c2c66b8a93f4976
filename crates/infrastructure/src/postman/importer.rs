//! Postman Importer - Document detection and byte-level entry points
//!
//! Decoding is strict: malformed JSON or a document that does not match the
//! expected schema fails as a whole. Lossy mapping (dropped items, unknown
//! methods) is reported through warnings instead.

use postline_domain::{Environment, Group};
use thiserror::Error;

use super::collection::{CollectionImport, from_postman, to_postman};
use super::environment::{EnvironmentImport, environment_from_postman, environment_to_postman};
use super::environment_types::PostmanEnvironment;
use super::types::PostmanCollection;
use crate::serialization::{SerializationError, to_json_stable_bytes};

/// Import error types
#[derive(Debug, Error)]
pub enum ImportError {
    /// JSON parsing failed
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    /// The JSON does not match the expected Postman schema
    #[error("Invalid Postman format: {0}")]
    InvalidFormat(String),
    /// The document is neither a collection nor an environment
    #[error("Unrecognized Postman document")]
    UnknownFormat,
}

impl ImportError {
    fn from_serde(error: &serde_json::Error) -> Self {
        if error.is_data() {
            Self::InvalidFormat(error.to_string())
        } else {
            Self::InvalidJson(error.to_string())
        }
    }
}

/// Kind of Postman document detected in a JSON value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    /// Postman Collection v2.x
    PostmanCollection,
    /// Postman Environment
    PostmanEnvironment,
    /// Not recognized
    Unknown,
}

/// A decoded Postman document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostmanDocument {
    /// A collection file
    Collection(PostmanCollection),
    /// An environment file
    Environment(PostmanEnvironment),
}

/// Detects the document kind from its top-level keys.
///
/// Collections carry an `info` object; environments carry `name` and
/// `values` without `info`.
#[must_use]
pub fn detect_format(json: &serde_json::Value) -> ImportFormat {
    if json.get("info").is_some() {
        return ImportFormat::PostmanCollection;
    }

    if json.get("name").is_some() && json.get("values").is_some() {
        return ImportFormat::PostmanEnvironment;
    }

    ImportFormat::Unknown
}

/// Decodes a collection or environment file, detecting which one it is.
///
/// # Errors
///
/// Returns an error if the bytes are not JSON, the kind cannot be detected,
/// or the document does not match its schema.
pub fn parse_document(bytes: &[u8]) -> Result<PostmanDocument, ImportError> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| ImportError::InvalidJson(e.to_string()))?;

    match detect_format(&value) {
        ImportFormat::PostmanCollection => serde_json::from_value(value)
            .map(PostmanDocument::Collection)
            .map_err(|e| ImportError::InvalidFormat(e.to_string())),
        ImportFormat::PostmanEnvironment => serde_json::from_value(value)
            .map(PostmanDocument::Environment)
            .map_err(|e| ImportError::InvalidFormat(e.to_string())),
        ImportFormat::Unknown => Err(ImportError::UnknownFormat),
    }
}

/// Decodes a Postman collection file.
///
/// # Errors
///
/// Returns an error if the bytes are not a valid collection.
pub fn parse_collection(bytes: &[u8]) -> Result<PostmanCollection, ImportError> {
    serde_json::from_slice(bytes).map_err(|e| ImportError::from_serde(&e))
}

/// Decodes a Postman environment file.
///
/// # Errors
///
/// Returns an error if the bytes are not a valid environment.
pub fn parse_environment(bytes: &[u8]) -> Result<PostmanEnvironment, ImportError> {
    serde_json::from_slice(bytes).map_err(|e| ImportError::from_serde(&e))
}

/// Decodes and maps a collection file into groups.
///
/// # Errors
///
/// Returns an error if the bytes are not a valid collection.
pub fn import_collection(bytes: &[u8]) -> Result<CollectionImport, ImportError> {
    let collection = parse_collection(bytes)?;
    let imported = from_postman(&collection);
    tracing::debug!(
        collection = %imported.name,
        groups = imported.groups.len(),
        requests = imported.request_count(),
        warnings = imported.warnings.len(),
        "Mapped Postman collection"
    );
    Ok(imported)
}

/// Decodes and maps an environment file.
///
/// # Errors
///
/// Returns an error if the bytes are not a valid environment.
pub fn import_environment(bytes: &[u8]) -> Result<EnvironmentImport, ImportError> {
    let environment = parse_environment(bytes)?;
    Ok(environment_from_postman(&environment))
}

/// Encodes groups as a Postman collection file.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn export_collection(groups: &[Group], name: &str) -> Result<Vec<u8>, SerializationError> {
    to_json_stable_bytes(&to_postman(groups, name))
}

/// Encodes an environment as a Postman environment file.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn export_environment(
    environment: &Environment,
    exported_using: &str,
) -> Result<Vec<u8>, SerializationError> {
    to_json_stable_bytes(&environment_to_postman(environment, exported_using))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use postline_domain::Request;

    #[test]
    fn test_detect_collection() {
        let json = serde_json::json!({"info": {"name": "x"}, "item": []});
        assert_eq!(detect_format(&json), ImportFormat::PostmanCollection);
    }

    #[test]
    fn test_detect_environment() {
        let json = serde_json::json!({"name": "dev", "values": []});
        assert_eq!(detect_format(&json), ImportFormat::PostmanEnvironment);
    }

    #[test]
    fn test_detect_unknown() {
        let json = serde_json::json!({"foo": "bar"});
        assert_eq!(detect_format(&json), ImportFormat::Unknown);
    }

    #[test]
    fn test_parse_document_routes_by_kind() {
        let collection = parse_document(br#"{"info": {"name": "c"}, "item": []}"#).unwrap();
        assert!(matches!(collection, PostmanDocument::Collection(c) if c.info.name == "c"));

        let environment = parse_document(br#"{"name": "e", "values": []}"#).unwrap();
        assert!(matches!(environment, PostmanDocument::Environment(e) if e.name == "e"));
    }

    #[test]
    fn test_parse_document_errors() {
        assert!(matches!(
            parse_document(b"{not json"),
            Err(ImportError::InvalidJson(_))
        ));
        assert!(matches!(
            parse_document(br#"{"foo": 1}"#),
            Err(ImportError::UnknownFormat)
        ));
        assert!(matches!(
            parse_document(br#"{"info": {"name": "c"}, "item": "nope"}"#),
            Err(ImportError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_collection_requires_info() {
        let result = parse_collection(br#"{"item": []}"#);
        assert!(matches!(result, Err(ImportError::InvalidFormat(_))));
    }

    #[test]
    fn test_parse_environment_malformed() {
        let result = parse_environment(b"{\"name\": ");
        assert!(matches!(result, Err(ImportError::InvalidJson(_))));

        // A type mismatch is reported before the missing closing bracket.
        let result = parse_environment(b"[1, 2");
        assert!(matches!(result, Err(ImportError::InvalidFormat(_))));
    }

    #[test]
    fn test_export_collection_is_stable_json() {
        let group = Group::new("g").with_request(Request::get("a", "http://x"));
        let bytes = export_collection(&[group], "Postline Export").unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.ends_with('\n'));
        assert!(text.contains("  \"info\""));

        let imported = import_collection(text.as_bytes()).unwrap();
        assert_eq!(imported.name, "Postline Export");
        assert_eq!(imported.groups[0].requests[0].url, "http://x");
    }

    #[test]
    fn test_export_environment_bytes() {
        let env = Environment::new("dev").with_variable("a", "1");
        let bytes = export_environment(&env, "Postline").unwrap();
        let imported = import_environment(&bytes).unwrap();
        assert_eq!(imported.environment.get("a"), Some("1"));
    }
}
