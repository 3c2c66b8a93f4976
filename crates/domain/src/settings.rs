//! Client Settings Domain Model
//!
//! Defines transport and export preferences for the Postline client.

use serde::{Deserialize, Serialize};

/// Settings used to build the HTTP client and to label exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// `User-Agent` sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum number of redirects followed before failing.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Overall request timeout. `None` keeps the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Product name written into Postman exports.
    #[serde(default = "default_product_name")]
    pub product_name: String,
}

fn default_user_agent() -> String {
    format!("Postline/{}", env!("CARGO_PKG_VERSION"))
}

const fn default_max_redirects() -> usize {
    10
}

fn default_product_name() -> String {
    "Postline".to_string()
}

impl ClientSettings {
    /// Returns the collection name used for Postman exports.
    #[must_use]
    pub fn export_name(&self) -> String {
        format!("{} Export", self.product_name)
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            max_redirects: default_max_redirects(),
            timeout_secs: None,
            product_name: default_product_name(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_settings() {
        let settings = ClientSettings::default();
        assert!(settings.user_agent.starts_with("Postline/"));
        assert_eq!(settings.max_redirects, 10);
        assert_eq!(settings.timeout_secs, None);
        assert_eq!(settings.export_name(), "Postline Export");
    }

    #[test]
    fn partial_json_fills_defaults() {
        let settings: ClientSettings = serde_json::from_str(r#"{"timeout_secs":5}"#).unwrap();
        assert_eq!(settings.timeout_secs, Some(5));
        assert_eq!(settings.max_redirects, 10);
        assert_eq!(settings.product_name, "Postline");
    }
}
