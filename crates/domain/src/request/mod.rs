//! HTTP Request types

mod body;
mod form;
mod header;
mod method;
mod spec;
mod transport;

pub use body::BodyKind;
pub use form::FormField;
pub use header::Header;
pub use method::HttpMethod;
pub use spec::Request;
pub use transport::{TransportRequest, TransportResponse};
