//! Postman Environment Type Definitions
//!
//! This module defines the types that represent a Postman Environment JSON file.

use serde::{Deserialize, Deserializer, Serialize};

/// Root structure for Postman Environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostmanEnvironment {
    /// Environment ID
    #[serde(default)]
    pub id: Option<String>,
    /// Environment name
    pub name: String,
    /// Environment variables
    #[serde(default)]
    pub values: Vec<PostmanEnvVariable>,
    /// Variable scope, always "environment" for environment files
    #[serde(rename = "_postman_variable_scope", default)]
    pub postman_variable_scope: Option<String>,
    /// Export timestamp
    #[serde(rename = "_postman_exported_at", default)]
    pub postman_exported_at: Option<String>,
    /// Exporting application
    #[serde(rename = "_postman_exported_using", default)]
    pub postman_exported_using: Option<String>,
}

/// Postman environment variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostmanEnvVariable {
    /// Variable key/name
    pub key: String,
    /// Variable value
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: String,
    /// Whether the variable is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Variable type (default, secret, any)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub var_type: Option<String>,
}

const fn default_true() -> bool {
    true
}

/// Accepts strings, numbers, booleans and null as a variable value.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_environment() {
        let json = r#"{
            "id": "env-123",
            "name": "Development",
            "values": [
                {"key": "BASE_URL", "value": "https://dev.api.com", "enabled": true},
                {"key": "API_KEY", "value": "secret123", "enabled": true, "type": "secret"}
            ],
            "_postman_variable_scope": "environment"
        }"#;

        let env: PostmanEnvironment = serde_json::from_str(json).unwrap();
        assert_eq!(env.name, "Development");
        assert_eq!(env.values.len(), 2);
        assert_eq!(env.values[0].var_type, None);
        assert_eq!(env.values[1].var_type.as_deref(), Some("secret"));
    }

    #[test]
    fn test_parse_minimal_environment() {
        let env: PostmanEnvironment = serde_json::from_str(r#"{"name": "Empty"}"#).unwrap();
        assert_eq!(env.name, "Empty");
        assert!(env.values.is_empty());
        assert!(env.id.is_none());
    }

    #[test]
    fn test_enabled_defaults_to_true() {
        let var: PostmanEnvVariable = serde_json::from_str(r#"{"key": "a", "value": "1"}"#).unwrap();
        assert!(var.enabled);
    }

    #[test]
    fn test_non_string_values() {
        let env: PostmanEnvironment = serde_json::from_str(
            r#"{"name": "n", "values": [
                {"key": "port", "value": 8080},
                {"key": "debug", "value": true},
                {"key": "nothing", "value": null}
            ]}"#,
        )
        .unwrap();
        assert_eq!(env.values[0].value, "8080");
        assert_eq!(env.values[1].value, "true");
        assert_eq!(env.values[2].value, "");
    }
}
