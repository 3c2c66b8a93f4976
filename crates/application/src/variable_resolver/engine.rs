//! Variable resolution engine
//!
//! Substitutes `{{key}}` placeholders from an environment's variables in a
//! single left-to-right pass. Unknown keys stay as literal text and
//! substituted values are never re-scanned.
//!
//! A placeholder name ends at the first `}}`, so a variable whose key
//! contains `}}` can never be referenced.

use postline_domain::{Environment, VariableMap};

/// Result of variable resolution for a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    /// The string with every known placeholder substituted.
    pub resolved: String,

    /// Placeholder names left unresolved, in first-seen order.
    pub unresolved: Vec<String>,

    /// Whether every placeholder was resolved.
    pub is_complete: bool,
}

impl ResolutionResult {
    /// Returns the count of unresolved variables.
    #[must_use]
    pub fn unresolved_count(&self) -> usize {
        self.unresolved.len()
    }
}

/// The variable resolution engine.
///
/// Borrows the variables of the active environment. With no environment it
/// is the identity function.
#[derive(Debug, Clone, Copy, Default)]
pub struct VariableResolver<'a> {
    variables: Option<&'a VariableMap>,
}

impl<'a> VariableResolver<'a> {
    /// Creates a resolver over an optional active environment.
    #[must_use]
    pub fn new(environment: Option<&'a Environment>) -> Self {
        Self {
            variables: environment.map(|e| &e.variables),
        }
    }

    /// Creates a resolver over a bare variable map.
    #[must_use]
    pub const fn from_variables(variables: &'a VariableMap) -> Self {
        Self {
            variables: Some(variables),
        }
    }

    fn lookup(&self, name: &str) -> Option<&'a str> {
        self.variables
            .and_then(|vars| vars.get(name))
            .map(String::as_str)
    }

    /// Resolves all placeholders in `template`.
    #[must_use]
    pub fn resolve(&self, template: &str) -> ResolutionResult {
        let mut resolved = String::with_capacity(template.len());
        let mut unresolved: Vec<String> = Vec::new();
        let mut rest = template;

        while let Some(open) = rest.find("{{") {
            resolved.push_str(&rest[..open]);
            let inner = &rest[open + 2..];
            let Some(close) = inner.find("}}") else {
                resolved.push_str(&rest[open..]);
                rest = "";
                break;
            };
            let name = &inner[..close];

            if let Some(value) = self.lookup(name) {
                resolved.push_str(value);
                rest = &inner[close + 2..];
            } else {
                if !name.is_empty() && !name.contains('{') && !unresolved.iter().any(|n| n == name)
                {
                    unresolved.push(name.to_string());
                }
                // Step past one brace so `{{{key}}}` still finds `{{key}}`.
                resolved.push('{');
                rest = &rest[open + 1..];
            }
        }
        resolved.push_str(rest);

        let is_complete = unresolved.is_empty();
        ResolutionResult {
            resolved,
            unresolved,
            is_complete,
        }
    }

    /// Resolves and returns only the output string.
    #[must_use]
    pub fn resolve_str(&self, template: &str) -> String {
        self.resolve(template).resolved
    }
}

/// Resolves `template` against `variables`.
#[must_use]
pub fn resolve(template: &str, variables: &VariableMap) -> String {
    VariableResolver::from_variables(variables).resolve_str(template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vars(pairs: &[(&str, &str)]) -> VariableMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_resolve_base_url() {
        let variables = vars(&[("baseUrl", "https://x.test")]);
        assert_eq!(
            resolve("{{baseUrl}}/api/posts", &variables),
            "https://x.test/api/posts"
        );
    }

    #[test]
    fn test_key_containing_closing_braces_never_matches() {
        let variables = vars(&[("a}}b", "X")]);
        let result = VariableResolver::from_variables(&variables).resolve("{{a}}b}}");
        assert_eq!(result.resolved, "{{a}}b}}");
        assert_eq!(result.unresolved, vec!["a".to_string()]);
    }

    #[test]
    fn test_missing_passes_through() {
        let variables = VariableMap::new();
        assert_eq!(resolve("{{missing}}", &variables), "{{missing}}");

        let result = VariableResolver::from_variables(&variables).resolve("{{missing}}/{{missing}}");
        assert_eq!(result.unresolved, vec!["missing".to_string()]);
        assert!(!result.is_complete);
    }

    #[test]
    fn test_no_environment_is_identity() {
        let resolver = VariableResolver::new(None);
        let result = resolver.resolve("{{a}} and {{b}}");
        assert_eq!(result.resolved, "{{a}} and {{b}}");
        assert_eq!(result.unresolved_count(), 2);
    }

    #[test]
    fn test_multiple_and_repeated_keys() {
        let variables = vars(&[("host", "h"), ("port", "1")]);
        assert_eq!(
            resolve("{{host}}:{{port}}/{{host}}", &variables),
            "h:1/h"
        );
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let variables = vars(&[("a", "{{b}}"), ("b", "nope")]);
        assert_eq!(resolve("x{{a}}y", &variables), "x{{b}}y");
    }

    #[test]
    fn test_triple_braces() {
        let variables = vars(&[("a", "1")]);
        assert_eq!(resolve("{{{a}}}", &variables), "{1}");
    }

    #[test]
    fn test_unterminated_placeholder() {
        let variables = vars(&[("a", "1")]);
        assert_eq!(resolve("{{a}} {{a", &variables), "1 {{a");
    }

    #[test]
    fn test_key_is_not_trimmed() {
        let variables = vars(&[("a", "1")]);
        assert_eq!(resolve("{{ a }}", &variables), "{{ a }}");
    }

    #[test]
    fn test_empty_value_substitutes() {
        let variables = vars(&[("token", "")]);
        assert_eq!(resolve("Bearer {{token}}", &variables), "Bearer ");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let variables = vars(&[("base", "https://x.test"), ("id", "7")]);
        let template = "{{base}}/posts/{{id}}?q={{unknown}}&{{";
        let once = resolve(template, &variables);
        assert_eq!(resolve(&once, &variables), once);
    }

    #[test]
    fn test_multibyte_text_is_preserved() {
        let variables = vars(&[("name", "José")]);
        assert_eq!(resolve("¡Hola {{name}}! ✓", &variables), "¡Hola José! ✓");
    }
}
