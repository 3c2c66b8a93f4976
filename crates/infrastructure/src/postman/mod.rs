//! Postman Interchange Module
//!
//! Import and export of Postman Collection v2.1 and Environment files.

pub mod collection;
pub mod environment;
pub mod environment_types;
pub mod importer;
pub mod types;
pub mod warning;

pub use collection::{CollectionImport, from_postman, to_postman};
pub use environment::{EnvironmentImport, environment_from_postman, environment_to_postman};
pub use environment_types::{PostmanEnvVariable, PostmanEnvironment};
pub use importer::{
    ImportError, ImportFormat, PostmanDocument, detect_format, export_collection,
    export_environment, import_collection, import_environment, parse_collection, parse_document,
    parse_environment,
};
pub use types::{COLLECTION_SCHEMA_V21, PostmanCollection};
pub use warning::{ImportWarning, WarningSeverity, WarningStats};
