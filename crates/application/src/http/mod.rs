//! Request construction: placeholder resolution, header filtering, and
//! body encoding.

pub mod multipart;
pub mod request_builder;

pub use multipart::{MultipartBody, encode_multipart, encode_with_boundary, generate_boundary};
pub use request_builder::{build_request, resolve_url};
