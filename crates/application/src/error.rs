//! Application error types

use postline_domain::DomainError;
use thiserror::Error;

/// Application-level errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// A request is already in flight.
    #[error("a request is already in flight")]
    Busy,

    /// An HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(String),
}

impl ApplicationError {
    /// Builds a `NotFound` error for an entity kind and id.
    pub fn not_found(kind: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{kind} {id}"))
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
