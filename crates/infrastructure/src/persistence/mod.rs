//! Persistence: project files and client settings.

mod project_file;
mod settings_repository;

pub use project_file::{
    ProjectFileError, load_project, read_project_file, save_project, write_project_file,
};
pub use settings_repository::{SettingsError, SettingsRepository};
