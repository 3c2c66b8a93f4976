//! Variable resolution module
//!
//! Provides resolution of `{{variable}}` syntax in strings.
//!
//! # Usage
//!
//! ```
//! use postline_application::variable_resolver::VariableResolver;
//! use postline_domain::Environment;
//!
//! let env = Environment::new("local").with_variable("host", "localhost");
//! let resolver = VariableResolver::new(Some(&env));
//!
//! let result = resolver.resolve("http://{{host}}/api");
//! assert_eq!(result.resolved, "http://localhost/api");
//! ```

pub mod engine;

pub use engine::{ResolutionResult, VariableResolver, resolve};
