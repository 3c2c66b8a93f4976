//! Normalized response record
//!
//! A `Response` is produced once per finished execution and replaced
//! wholesale by the next one. It is never persisted.

use std::time::Duration;

use crate::request::{Header, TransportResponse};

/// Normalized outcome of a finished execution.
///
/// Either `status_code` is set (the server answered) or `error` is set
/// (the request never got an answer). Both are never set together.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Response {
    /// HTTP status code, unset on transport failure
    pub status_code: Option<u16>,
    /// Response headers in the order received
    pub headers: Vec<Header>,
    /// Body decoded as UTF-8, invalid sequences replaced
    pub body: String,
    /// Human-readable failure message
    pub error: Option<String>,
    /// Wall-clock time from dispatch to completion
    pub elapsed: Option<Duration>,
    /// Raw payload length in bytes
    pub size_bytes: Option<usize>,
}

impl Response {
    /// Builds a response from what the transport returned.
    #[must_use]
    pub fn from_transport(transport: TransportResponse, elapsed: Duration) -> Self {
        let size = transport.body.len();
        Self {
            status_code: Some(transport.status),
            headers: transport
                .headers
                .into_iter()
                .map(|(k, v)| Header::new(k, v))
                .collect(),
            body: String::from_utf8_lossy(&transport.body).into_owned(),
            error: None,
            elapsed: Some(elapsed),
            size_bytes: Some(size),
        }
    }

    /// Builds a failure response. `elapsed` is `None` when nothing was dispatched.
    #[must_use]
    pub fn failure(message: impl Into<String>, elapsed: Option<Duration>) -> Self {
        Self {
            error: Some(message.into()),
            elapsed,
            ..Self::default()
        }
    }

    /// Returns elapsed time in fractional seconds.
    #[must_use]
    pub fn elapsed_seconds(&self) -> Option<f64> {
        self.elapsed.map(|d| d.as_secs_f64())
    }

    /// Returns the first header value with the given name, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.is_named(name))
            .map(|h| h.value.as_str())
    }

    /// Returns the canonical reason phrase for common status codes.
    #[must_use]
    pub const fn reason_phrase(&self) -> &'static str {
        let Some(code) = self.status_code else {
            return "";
        };
        match code {
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            304 => "Not Modified",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            409 => "Conflict",
            422 => "Unprocessable Entity",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => "Unknown",
        }
    }
}
