//! Environment mapping between Postline and Postman Environment files.

use postline_domain::{Environment, VariableMap, generate_id_v4};

use super::environment_types::{PostmanEnvVariable, PostmanEnvironment};
use super::warning::ImportWarning;

/// Result of mapping a Postman environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentImport {
    /// The imported environment, with a fresh id
    pub environment: Environment,
    /// Warnings produced while mapping
    pub warnings: Vec<ImportWarning>,
}

/// Exports an environment as a Postman environment file.
///
/// The exported id is freshly generated. Every variable is written as
/// enabled, in ascending key order.
#[must_use]
pub fn environment_to_postman(environment: &Environment, exported_using: &str) -> PostmanEnvironment {
    PostmanEnvironment {
        id: Some(generate_id_v4().to_string()),
        name: environment.name.clone(),
        values: environment
            .variables
            .iter()
            .map(|(key, value)| PostmanEnvVariable {
                key: key.clone(),
                value: value.clone(),
                enabled: true,
                var_type: None,
            })
            .collect(),
        postman_variable_scope: Some("environment".to_string()),
        postman_exported_at: Some(String::new()),
        postman_exported_using: Some(exported_using.to_string()),
    }
}

/// Maps a Postman environment file into an environment.
///
/// Later entries win over earlier ones with the same key. Disabled entries
/// are imported like enabled ones.
#[must_use]
pub fn environment_from_postman(postman: &PostmanEnvironment) -> EnvironmentImport {
    let mut warnings = Vec::new();
    let mut variables = VariableMap::new();
    let mut disabled = 0usize;

    for value in &postman.values {
        if !value.enabled {
            disabled += 1;
        }
        if variables
            .insert(value.key.clone(), value.value.clone())
            .is_some()
        {
            warnings.push(ImportWarning::info(
                &postman.name,
                format!("Duplicate variable {}, last value kept", value.key),
            ));
        }
    }

    if disabled > 0 {
        warnings.push(ImportWarning::info(
            &postman.name,
            format!("{disabled} disabled variable(s) imported as regular variables"),
        ));
    }

    let mut environment = Environment::new(postman.name.clone());
    environment.variables = variables;

    EnvironmentImport {
        environment,
        warnings,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_export_shape() {
        let env = Environment::new("local")
            .with_variable("token", "abc")
            .with_variable("baseUrl", "http://localhost");

        let exported = environment_to_postman(&env, "Postline");
        let json = serde_json::to_value(&exported).unwrap();

        assert_eq!(json["name"], "local");
        assert_eq!(json["_postman_variable_scope"], "environment");
        assert_eq!(json["_postman_exported_at"], "");
        assert_eq!(json["_postman_exported_using"], "Postline");
        assert_eq!(
            json["values"],
            serde_json::json!([
                {"key": "baseUrl", "value": "http://localhost", "enabled": true},
                {"key": "token", "value": "abc", "enabled": true}
            ])
        );
    }

    #[test]
    fn test_export_id_is_fresh() {
        let env = Environment::new("local");
        let a = environment_to_postman(&env, "Postline").id.unwrap();
        let b = environment_to_postman(&env, "Postline").id.unwrap();
        assert_ne!(a, b);
        assert_ne!(a, env.id.to_string());
    }

    #[test]
    fn test_import_last_duplicate_wins() {
        let postman: PostmanEnvironment = serde_json::from_str(
            r#"{"name": "dev", "values": [
                {"key": "host", "value": "a"},
                {"key": "host", "value": "b"}
            ]}"#,
        )
        .unwrap();

        let imported = environment_from_postman(&postman);
        assert_eq!(imported.environment.get("host"), Some("b"));
        assert_eq!(imported.environment.variable_count(), 1);
        assert_eq!(imported.warnings.len(), 1);
    }

    #[test]
    fn test_import_keeps_disabled_entries() {
        let postman: PostmanEnvironment = serde_json::from_str(
            r#"{"name": "dev", "values": [
                {"key": "a", "value": "1", "enabled": false},
                {"key": "b", "value": "2", "enabled": true}
            ]}"#,
        )
        .unwrap();

        let imported = environment_from_postman(&postman);
        assert_eq!(imported.environment.get("a"), Some("1"));
        assert_eq!(imported.environment.get("b"), Some("2"));
        assert_eq!(imported.warnings.len(), 1);
        assert!(imported.warnings[0].message.starts_with("1 disabled"));
    }

    #[test]
    fn test_round_trip() {
        let env = Environment::new("staging")
            .with_variable("baseUrl", "https://staging.example.com")
            .with_variable("token", "t");

        let imported = environment_from_postman(&environment_to_postman(&env, "Postline"));
        assert_eq!(imported.environment.name, env.name);
        assert_eq!(imported.environment.variables, env.variables);
        assert!(imported.warnings.is_empty());
    }
}
