//! Request execution state types.
//!
//! Execution follows `Idle -> InFlight -> {Completed, Failed, Cancelled}`.
//! An invalid URL goes straight from `Idle` to `Failed`.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::response::Response;

/// Current state of the single execution slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    /// Nothing has been sent yet.
    #[default]
    Idle,

    /// A request is on the wire.
    InFlight {
        /// When the request was dispatched.
        started_at: Instant,
    },

    /// The server answered.
    Completed {
        /// The response data.
        response: Box<Response>,
    },

    /// The request failed before an answer arrived.
    Failed {
        /// Error category for display.
        kind: RequestErrorKind,
        /// Human-readable error message.
        message: String,
    },

    /// The user cancelled the request.
    Cancelled,
}

impl RequestState {
    /// Creates an `InFlight` state stamped with the current time.
    #[must_use]
    pub fn in_flight() -> Self {
        Self::InFlight {
            started_at: Instant::now(),
        }
    }

    /// Creates a `Completed` state from a response.
    #[must_use]
    pub fn completed(response: Response) -> Self {
        Self::Completed {
            response: Box::new(response),
        }
    }

    /// Creates a `Failed` state.
    #[must_use]
    pub fn failed(kind: RequestErrorKind, message: impl Into<String>) -> Self {
        Self::Failed {
            kind,
            message: message.into(),
        }
    }

    /// Returns true if a request is in progress.
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight { .. })
    }

    /// Returns true once an execution has reached an end state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed { .. } | Self::Failed { .. } | Self::Cancelled
        )
    }

    /// Returns the error message if in `Failed` state.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Returns the elapsed time if in flight.
    #[must_use]
    pub fn elapsed(&self) -> Option<std::time::Duration> {
        match self {
            Self::InFlight { started_at } => Some(started_at.elapsed()),
            _ => None,
        }
    }
}

/// Categories of request errors for user-friendly display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestErrorKind {
    /// Invalid URL format.
    InvalidUrl,

    /// A header name or value could not be sent.
    InvalidHeader,

    /// DNS resolution failed.
    DnsError,

    /// Could not establish connection.
    ConnectionFailed,

    /// Connection was refused by the server.
    ConnectionRefused,

    /// Request timed out.
    Timeout,

    /// TLS/SSL error.
    TlsError,

    /// Too many redirects.
    TooManyRedirects,

    /// Unknown or unexpected error.
    Unknown,
}

impl RequestErrorKind {
    /// Returns user-friendly suggestions for this error type.
    #[must_use]
    pub const fn suggestions(&self) -> &[&'static str] {
        match self {
            Self::InvalidUrl => &[
                "Check that the URL starts with http:// or https://",
                "Check that every {{variable}} is defined in the active environment",
            ],
            Self::InvalidHeader => &["Header names cannot contain spaces or control characters"],
            Self::DnsError => &[
                "Check if the hostname is correct",
                "Verify your internet connection",
            ],
            Self::ConnectionFailed | Self::ConnectionRefused => &[
                "Check if the server is running",
                "Verify the port number is correct",
            ],
            Self::Timeout => &[
                "The server may be slow or overloaded",
                "Check your network connection",
            ],
            Self::TlsError => &[
                "The server's SSL certificate may be invalid",
                "Verify the hostname matches the certificate",
            ],
            Self::TooManyRedirects => &[
                "The server may have a redirect loop",
                "Try the final URL directly",
            ],
            Self::Unknown => &["Check the error details for more information"],
        }
    }

    /// Returns a human-readable title for this error type.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::InvalidUrl => "Invalid URL",
            Self::InvalidHeader => "Invalid Header",
            Self::DnsError => "DNS Resolution Failed",
            Self::ConnectionFailed => "Connection Failed",
            Self::ConnectionRefused => "Connection Refused",
            Self::Timeout => "Request Timeout",
            Self::TlsError => "SSL/TLS Error",
            Self::TooManyRedirects => "Too Many Redirects",
            Self::Unknown => "Unknown Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        let state = RequestState::default();
        assert_eq!(state, RequestState::Idle);
        assert!(!state.is_in_flight());
        assert!(!state.is_terminal());
    }

    #[test]
    fn test_in_flight() {
        let state = RequestState::in_flight();
        assert!(state.is_in_flight());
        assert!(state.elapsed().is_some());
    }

    #[test]
    fn test_completed() {
        let response = Response {
            status_code: Some(200),
            ..Default::default()
        };
        let state = RequestState::completed(response);
        assert!(state.is_terminal());
        assert!(state.elapsed().is_none());
    }

    #[test]
    fn test_failed() {
        let state = RequestState::failed(RequestErrorKind::InvalidUrl, "Invalid URL");
        assert!(state.is_terminal());
        assert_eq!(state.error_message(), Some("Invalid URL"));
        assert!(RequestState::Cancelled.is_terminal());
    }

    #[test]
    fn test_error_kind_title() {
        assert_eq!(RequestErrorKind::Timeout.title(), "Request Timeout");
        assert_eq!(RequestErrorKind::InvalidUrl.title(), "Invalid URL");
        assert!(!RequestErrorKind::ConnectionRefused.suggestions().is_empty());
    }
}
