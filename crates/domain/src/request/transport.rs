//! Wire-level request and response descriptors
//!
//! These are what the HTTP client port consumes and produces. They carry
//! fully resolved values and no identifiers.

use url::Url;

use super::HttpMethod;

/// A fully resolved request, ready to be dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute URL
    pub url: Url,
    /// Header pairs in send order; duplicates are kept
    pub headers: Vec<(String, String)>,
    /// Body bytes, if any
    pub body: Option<Vec<u8>>,
}

impl TransportRequest {
    /// Returns the first header value with the given name, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response as returned by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransportResponse {
    /// Status code
    pub status: u16,
    /// Header pairs in the order received
    pub headers: Vec<(String, String)>,
    /// Raw payload
    pub body: Vec<u8>,
}
