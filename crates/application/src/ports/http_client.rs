//! HTTP Client port

use std::future::Future;

use postline_domain::{RequestErrorKind, TransportRequest, TransportResponse};
use thiserror::Error;

/// Transport-level failures reported by an `HttpClient`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpClientError {
    /// The URL was rejected by the transport.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A header could not be encoded.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The host name could not be resolved.
    #[error("Could not resolve host {host}: {message}")]
    DnsError {
        /// Host that failed to resolve
        host: String,
        /// Underlying message
        message: String,
    },

    /// The server refused the connection.
    #[error("Connection refused: {host}:{port}")]
    ConnectionRefused {
        /// Target host
        host: String,
        /// Target port
        port: u16,
    },

    /// The connection could not be established for another reason.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The request did not complete in time.
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout {
        /// Configured timeout
        timeout_ms: u64,
    },

    /// TLS negotiation failed.
    #[error("TLS error: {0}")]
    TlsError(String),

    /// Redirect limit exceeded.
    #[error("Too many redirects (max {max})")]
    TooManyRedirects {
        /// Configured limit
        max: usize,
    },

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

impl HttpClientError {
    /// Maps this error to a display category.
    #[must_use]
    pub const fn to_error_kind(&self) -> RequestErrorKind {
        match self {
            Self::InvalidUrl(_) => RequestErrorKind::InvalidUrl,
            Self::InvalidHeader(_) => RequestErrorKind::InvalidHeader,
            Self::DnsError { .. } => RequestErrorKind::DnsError,
            Self::ConnectionRefused { .. } => RequestErrorKind::ConnectionRefused,
            Self::ConnectionFailed(_) => RequestErrorKind::ConnectionFailed,
            Self::Timeout { .. } => RequestErrorKind::Timeout,
            Self::TlsError(_) => RequestErrorKind::TlsError,
            Self::TooManyRedirects { .. } => RequestErrorKind::TooManyRedirects,
            Self::Other(_) => RequestErrorKind::Unknown,
        }
    }
}

/// Port for executing HTTP requests.
///
/// This trait abstracts the HTTP client implementation, allowing
/// the application layer to be independent of specific HTTP libraries.
/// Requests arrive fully resolved; the client only moves bytes.
pub trait HttpClient: Send + Sync + 'static {
    /// Executes a request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails due to network issues,
    /// timeout, or other transport problems. HTTP error statuses are not
    /// errors.
    fn execute(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, HttpClientError>> + Send;
}
