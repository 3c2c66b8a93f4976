//! `multipart/form-data` encoder.
//!
//! Produces the raw bytes of a multipart body from text form fields. Only
//! enabled fields are encoded, in sequence order.

use postline_domain::{FormField, generate_id_v4};

/// An encoded multipart body and the boundary that delimits its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartBody {
    /// Encoded body bytes
    pub bytes: Vec<u8>,
    /// Boundary token, without leading dashes
    pub boundary: String,
}

impl MultipartBody {
    /// Returns the `Content-Type` header value for this body.
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }
}

/// Generates a fresh boundary token.
#[must_use]
pub fn generate_boundary() -> String {
    format!("Boundary-{}", generate_id_v4().to_string().to_uppercase())
}

/// Encodes the enabled `fields` with a freshly generated boundary.
#[must_use]
pub fn encode_multipart(fields: &[FormField]) -> MultipartBody {
    let boundary = generate_boundary();
    let bytes = encode_with_boundary(fields, &boundary);
    MultipartBody { bytes, boundary }
}

/// Encodes the enabled `fields` using the given boundary.
#[must_use]
pub fn encode_with_boundary(fields: &[FormField], boundary: &str) -> Vec<u8> {
    let mut body = Vec::new();
    for field in fields.iter().filter(|f| f.enabled) {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", field.key).as_bytes(),
        );
        body.extend_from_slice(field.value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}
