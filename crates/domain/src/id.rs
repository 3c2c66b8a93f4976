//! ID generation utilities.

use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

/// Generates a new identifier for a Postline entity.
///
/// Identifiers are UUID v7 values: unique, never reused, and sortable by
/// creation time.
#[must_use]
pub fn generate_id() -> Uuid {
    Uuid::now_v7()
}

/// Generates a new random UUID v4.
///
/// Used where an opaque token is needed that should not leak creation order,
/// such as exported Postman environment ids.
#[must_use]
pub fn generate_id_v4() -> Uuid {
    Uuid::new_v4()
}

/// Parses a hyphenated identifier string.
///
/// # Errors
///
/// Returns `InvalidIdentifier` if the string is empty or not a UUID.
pub fn parse_id(value: &str) -> DomainResult<Uuid> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidIdentifier("empty identifier".to_string()));
    }
    Uuid::parse_str(trimmed).map_err(|_| DomainError::InvalidIdentifier(trimmed.to_string()))
}
