//! Builds wire-level requests from stored request definitions.

use url::Url;

use postline_domain::{
    BodyKind, DomainError, DomainResult, Environment, FormField, Request, TransportRequest,
};

use super::multipart::encode_multipart;
use crate::variable_resolver::VariableResolver;

const CONTENT_TYPE: &str = "Content-Type";

/// Resolves `request` against the active environment and produces the
/// transport request to dispatch.
///
/// Disabled headers and headers with an empty name are omitted. GET never
/// carries a body. A form-data body replaces any user `Content-Type` with the
/// multipart one.
///
/// # Errors
///
/// Returns `DomainError::InvalidUrl` if the resolved URL is not a valid
/// absolute URL, and `DomainError::InvalidHeaderName` if an enabled header
/// name cannot be sent.
pub fn build_request(
    request: &Request,
    environment: Option<&Environment>,
) -> DomainResult<TransportRequest> {
    let resolver = VariableResolver::new(environment);

    let url = resolve_url(&resolver, &request.url)?;

    let mut headers = Vec::with_capacity(request.headers.len() + 1);
    for header in request.enabled_headers() {
        let key = header.key.trim();
        if key.is_empty() {
            continue;
        }
        if !is_valid_header_name(key) {
            return Err(DomainError::InvalidHeaderName(key.to_string()));
        }
        headers.push((key.to_string(), resolver.resolve_str(&header.value)));
    }

    let mut body = None;
    if request.method.sends_body() {
        match request.body_kind {
            BodyKind::Raw => {
                let raw = resolver.resolve_str(&request.raw_body);
                if !raw.is_empty() {
                    body = Some(raw.into_bytes());
                }
            }
            BodyKind::FormData => {
                let fields: Vec<FormField> = request
                    .enabled_form_fields()
                    .map(|f| FormField {
                        value: resolver.resolve_str(&f.value),
                        ..f.clone()
                    })
                    .collect();
                let multipart = encode_multipart(&fields);
                headers.retain(|(k, _)| !k.eq_ignore_ascii_case(CONTENT_TYPE));
                headers.push((CONTENT_TYPE.to_string(), multipart.content_type()));
                body = Some(multipart.bytes);
            }
        }
    }

    Ok(TransportRequest {
        method: request.method,
        url,
        headers,
        body,
    })
}

/// Resolves a URL template and checks that it is a valid absolute URL.
///
/// # Errors
///
/// Returns `DomainError::InvalidUrl` carrying the resolved text.
pub fn resolve_url(resolver: &VariableResolver<'_>, template: &str) -> DomainResult<Url> {
    let resolved = resolver.resolve_str(template);
    if resolved.trim().is_empty() {
        return Err(DomainError::InvalidUrl(resolved));
    }
    Url::parse(&resolved).map_err(|_| DomainError::InvalidUrl(resolved))
}

/// HTTP token characters (RFC 9110 section 5.6.2).
fn is_valid_header_name(name: &str) -> bool {
    name.bytes().all(|b| {
        b.is_ascii_alphanumeric()
            || matches!(
                b,
                b'!' | b'#'
                    | b'$'
                    | b'%'
                    | b'&'
                    | b'\''
                    | b'*'
                    | b'+'
                    | b'-'
                    | b'.'
                    | b'^'
                    | b'_'
                    | b'`'
                    | b'|'
                    | b'~'
            )
    })
}
