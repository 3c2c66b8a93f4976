//! Postline Domain - Core business types
//!
//! This crate defines the domain model for the Postline REST client.
//! All types here are pure Rust with no I/O dependencies.

pub mod collection;
pub mod environment;
pub mod error;
pub mod id;
pub mod project;
pub mod request;
pub mod response;
pub mod settings;
pub mod state;

pub use collection::Group;
pub use environment::{Environment, VariableMap};
pub use error::{DomainError, DomainResult};
pub use id::{generate_id, generate_id_v4, parse_id};
pub use project::Project;
pub use request::{
    BodyKind, FormField, Header, HttpMethod, Request, TransportRequest, TransportResponse,
};
pub use response::Response;
pub use settings::ClientSettings;
pub use state::{RequestErrorKind, RequestState};
