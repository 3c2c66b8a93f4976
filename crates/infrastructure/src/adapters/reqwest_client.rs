//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! Requests arrive fully built; the adapter only moves bytes and classifies
//! transport failures.

use std::error::Error as _;
use std::future::Future;
use std::time::Duration;

use postline_application::ports::{HttpClient, HttpClientError};
use postline_domain::{ClientSettings, HttpMethod, TransportRequest, TransportResponse};
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Client, Method};

/// HTTP client implementation using reqwest.
///
/// Wraps a `reqwest::Client` configured from `ClientSettings`. Dropping the
/// future returned by `execute` aborts the underlying request.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    timeout_ms: u64,
    max_redirects: usize,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client from settings.
    ///
    /// - User-Agent from `settings.user_agent`
    /// - Follows up to `settings.max_redirects` redirects
    /// - Overall timeout only when `settings.timeout_secs` is set
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(settings: &ClientSettings) -> Result<Self, HttpClientError> {
        let mut builder = Client::builder()
            .user_agent(settings.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(settings.max_redirects));

        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self {
            client,
            timeout_ms: settings.timeout_secs.map_or(0, |s| s.saturating_mul(1000)),
            max_redirects: settings.max_redirects,
        })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    fn to_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), HttpClientError> {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| HttpClientError::InvalidHeader(name.to_string()))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| HttpClientError::InvalidHeader(format!("{name}: invalid value")))?;
        Ok((header_name, header_value))
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64, max_redirects: usize) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: max_redirects };
        }

        if error.is_builder() {
            return HttpClientError::InvalidUrl(
                error
                    .url()
                    .map_or_else(|| error_chain(error), ToString::to_string),
            );
        }

        let host = error
            .url()
            .and_then(|u| u.host_str())
            .unwrap_or("unknown")
            .to_string();
        let message = error_chain(error);
        let lowered = message.to_lowercase();

        if error.is_connect() {
            if lowered.contains("dns") || lowered.contains("resolve") {
                return HttpClientError::DnsError { host, message };
            }
            if lowered.contains("certificate") || lowered.contains("tls") {
                return HttpClientError::TlsError(message);
            }
            if lowered.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host,
                    port: error
                        .url()
                        .and_then(reqwest::Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        HttpClientError::Other(message)
    }
}

/// Joins an error with its sources, since reqwest keeps the useful part of
/// connect failures in the source chain.
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl HttpClient for ReqwestHttpClient {
    fn execute(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, HttpClientError>> + Send {
        let client = self.client.clone();
        let timeout_ms = self.timeout_ms;
        let max_redirects = self.max_redirects;

        async move {
            let mut builder = client.request(Self::to_reqwest_method(request.method), request.url);

            for (name, value) in &request.headers {
                let (header_name, header_value) = Self::to_header(name, value)?;
                builder = builder.header(header_name, header_value);
            }

            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms, max_redirects))?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .map(|(k, v)| {
                    (
                        k.to_string(),
                        String::from_utf8_lossy(v.as_bytes()).into_owned(),
                    )
                })
                .collect();

            let body = response
                .bytes()
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms, max_redirects))?
                .to_vec();

            tracing::debug!(status, size = body.len(), "Transport response received");

            Ok(TransportResponse {
                status,
                headers,
                body,
            })
        }
    }
}
