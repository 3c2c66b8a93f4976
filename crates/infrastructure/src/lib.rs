//! Postline Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, the Postman interchange format,
//! and file persistence.

pub mod adapters;
pub mod persistence;
pub mod postman;
pub mod serialization;

pub use adapters::ReqwestHttpClient;
pub use persistence::{
    ProjectFileError, SettingsError, SettingsRepository, load_project, read_project_file,
    save_project, write_project_file,
};
pub use postman::{
    CollectionImport, EnvironmentImport, ImportError, ImportWarning, PostmanCollection,
    PostmanDocument, PostmanEnvironment, WarningSeverity, WarningStats,
};
pub use serialization::{
    SerializationError, from_json_bytes, to_json_stable, to_json_stable_bytes,
};
