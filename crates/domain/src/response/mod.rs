//! HTTP Response types

mod spec;

pub use spec::Response;
