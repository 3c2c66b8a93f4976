//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod cancellation;
mod http_client;

pub use cancellation::{CancellationReceiver, CancellationToken};
pub use http_client::{HttpClient, HttpClientError};
