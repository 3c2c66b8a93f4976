//! Errors surfaced by the `App` facade.

use postline_application::ApplicationError;
use thiserror::Error;

/// Failures reported at the facade boundary.
///
/// None of these leave the project partially modified.
#[derive(Debug, Error)]
pub enum AppError {
    /// Imported or loaded bytes are malformed or do not match the schema.
    #[error("decode error: {0}")]
    Decode(String),

    /// The project could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// A project file could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// A store or controller operation failed.
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

/// Result type alias for facade operations.
pub type AppResult<T> = Result<T, AppError>;
