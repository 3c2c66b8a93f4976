//! Stored request definition

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BodyKind, FormField, Header, HttpMethod};
use crate::id::generate_id;

/// A stored HTTP request definition.
///
/// Templates (`url`, header values, `raw_body`, form values) may contain
/// `{{variable}}` placeholders that are resolved at send time. Both the raw
/// body and the form fields are kept; `body_kind` selects which is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Unique identifier
    pub id: Uuid,
    /// Human-readable name
    pub name: String,
    /// HTTP method
    #[serde(default)]
    pub method: HttpMethod,
    /// URL template
    pub url: String,
    /// Ordered headers
    #[serde(default)]
    pub headers: Vec<Header>,
    /// Which body is sent
    #[serde(default)]
    pub body_kind: BodyKind,
    /// Raw body text
    #[serde(default)]
    pub raw_body: String,
    /// Ordered form fields
    #[serde(default)]
    pub form_fields: Vec<FormField>,
}

impl Request {
    /// Creates a new request with the given name, method, and URL.
    #[must_use]
    pub fn new(name: impl Into<String>, method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            method,
            url: url.into(),
            headers: Vec::new(),
            body_kind: BodyKind::Raw,
            raw_body: String::new(),
            form_fields: Vec::new(),
        }
    }

    /// Creates a new GET request.
    #[must_use]
    pub fn get(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Get, url)
    }

    /// Creates a new POST request.
    #[must_use]
    pub fn post(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Post, url)
    }

    /// Adds a header and returns self for chaining.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header::new(key, value));
        self
    }

    /// Sets a raw body and returns self for chaining.
    #[must_use]
    pub fn with_raw_body(mut self, body: impl Into<String>) -> Self {
        self.body_kind = BodyKind::Raw;
        self.raw_body = body.into();
        self
    }

    /// Switches to a form-data body with the given fields.
    #[must_use]
    pub fn with_form_fields(mut self, fields: Vec<FormField>) -> Self {
        self.body_kind = BodyKind::FormData;
        self.form_fields = fields;
        self
    }

    /// Returns the headers that will be sent.
    pub fn enabled_headers(&self) -> impl Iterator<Item = &Header> {
        self.headers.iter().filter(|h| h.enabled)
    }

    /// Returns the form fields that will be encoded.
    pub fn enabled_form_fields(&self) -> impl Iterator<Item = &FormField> {
        self.form_fields.iter().filter(|f| f.enabled)
    }

    /// Returns a copy with a fresh identifier for this request and every row.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        copy.id = generate_id();
        for header in &mut copy.headers {
            header.id = generate_id();
        }
        for field in &mut copy.form_fields {
            field.id = generate_id();
        }
        copy
    }
}
