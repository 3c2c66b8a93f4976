//! Deterministic JSON serialization for Postline files.
//!
//! The same value always encodes to the same bytes:
//! - Map keys sorted (via `BTreeMap` in domain types)
//! - 2-space indentation
//! - Trailing newline
//! - UTF-8 without BOM

mod json;

pub use json::*;
