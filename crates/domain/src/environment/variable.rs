//! Environment variable types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::id::generate_id;

/// Variables keyed by name.
///
/// Ordered so that serialization and export are deterministic.
pub type VariableMap = BTreeMap<String, String>;

/// A named set of string variables used for `{{key}}` substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Unique identifier
    pub id: Uuid,
    /// Environment name (e.g., "local", "staging")
    pub name: String,
    /// Variables in this environment
    #[serde(default)]
    pub variables: VariableMap,
}

impl Environment {
    /// Creates a new empty environment with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            variables: VariableMap::new(),
        }
    }

    /// Adds a variable and returns self for chaining.
    #[must_use]
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Inserts or overwrites a variable.
    pub fn set_variable(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Gets a variable value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Removes a variable by key.
    pub fn remove_variable(&mut self, key: &str) -> Option<String> {
        self.variables.remove(key)
    }

    /// Renames a variable, keeping its value.
    ///
    /// Returns false if `old` does not exist. An existing `new` key is
    /// overwritten.
    pub fn rename_variable(&mut self, old: &str, new: impl Into<String>) -> bool {
        let Some(value) = self.variables.remove(old) else {
            return false;
        };
        self.variables.insert(new.into(), value);
        true
    }

    /// Returns the number of variables.
    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new("New Environment")
    }
}
