//! Postline Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for external dependencies)
//! - Variable resolution and request building
//! - Request execution, cancellation, and the execution state machine
//! - The project store that owns groups and environments

pub mod controller;
pub mod error;
pub mod execute_request;
pub mod http;
pub mod ports;
pub mod store;
pub mod variable_resolver;

pub use controller::{Completion, ExecutionId, INVALID_URL_MESSAGE, RequestController, RequestEvent};
pub use error::{ApplicationError, ApplicationResult};
pub use execute_request::{ExecuteRequest, ExecutionOutcome};
pub use http::{MultipartBody, build_request, encode_multipart};
pub use ports::{CancellationReceiver, CancellationToken, HttpClient, HttpClientError};
pub use store::{MergeOutcome, ProjectStore};
pub use variable_resolver::{ResolutionResult, VariableResolver};
