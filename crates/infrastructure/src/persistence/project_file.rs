//! Project file persistence.
//!
//! A project file is the JSON encoding of a `Project`: groups and
//! environments, written wholesale. Decoding either yields a complete
//! project or an error; nothing is applied partially.

use std::path::{Path, PathBuf};

use postline_domain::Project;
use tokio::fs;

use crate::serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};

/// Error type for project file operations.
#[derive(Debug, thiserror::Error)]
pub enum ProjectFileError {
    /// The project file does not exist.
    #[error("Project file not found: {0}")]
    NotFound(PathBuf),

    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),
}

/// Encodes a project as deterministic JSON bytes.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn save_project(project: &Project) -> Result<Vec<u8>, SerializationError> {
    to_json_stable_bytes(project)
}

/// Decodes a project from JSON bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not a valid project document.
pub fn load_project(bytes: &[u8]) -> Result<Project, SerializationError> {
    from_json_bytes(bytes)
}

/// Writes a project file.
///
/// The bytes go to a sibling temporary file first and are renamed into
/// place, so an interrupted write never leaves a truncated project behind.
///
/// # Errors
///
/// Returns an error if encoding or any file operation fails.
pub async fn write_project_file(path: &Path, project: &Project) -> Result<(), ProjectFileError> {
    let content = save_project(project)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).await?;
    }

    let temp_path = temp_path_for(path);
    fs::write(&temp_path, &content).await?;
    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(e.into());
    }

    tracing::info!(
        path = %path.display(),
        groups = project.groups.len(),
        environments = project.environments.len(),
        "Saved project"
    );
    Ok(())
}

/// Reads a project file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not decode.
pub async fn read_project_file(path: &Path) -> Result<Project, ProjectFileError> {
    let content = fs::read(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ProjectFileError::NotFound(path.to_path_buf())
        } else {
            ProjectFileError::Io(e)
        }
    })?;

    let project = load_project(&content)?;
    tracing::info!(
        path = %path.display(),
        groups = project.groups.len(),
        environments = project.environments.len(),
        "Loaded project"
    );
    Ok(project)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use postline_domain::{BodyKind, Environment, FormField, Group, Header, Request};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_project() -> Project {
        Project::new(
            vec![Group::new("Posts").with_request(
                Request::get("List", "{{baseUrl}}/posts").with_header("Accept", "*/*"),
            )],
            vec![Environment::new("local").with_variable("baseUrl", "http://localhost")],
        )
    }

    #[test]
    fn test_save_and_load_bytes() {
        let project = sample_project();
        let bytes = save_project(&project).unwrap();
        let loaded = load_project(&bytes).unwrap();
        assert_eq!(loaded, project);
    }

    #[test]
    fn test_round_trip_keeps_empty_and_disabled_rows() {
        let mut request = Request::post("Upload", "{{baseUrl}}/upload").with_form_fields(vec![
            FormField::new("title", "{{title}}"),
            FormField::disabled("draft", "true"),
        ]);
        request.headers.push(Header::disabled("X-Debug", "1"));
        request.raw_body = "kept while form data is selected".to_string();

        let project = Project::new(
            vec![Group::new("Uploads").with_request(request), Group::new("Empty")],
            vec![
                Environment::new("blank"),
                Environment::new("local").with_variable("baseUrl", "http://localhost"),
            ],
        );

        let loaded = load_project(&save_project(&project).unwrap()).unwrap();

        assert_eq!(loaded, project);
        assert_eq!(loaded.groups[0].requests[0].body_kind, BodyKind::FormData);
        assert!(loaded.groups[1].requests.is_empty());
        assert_eq!(loaded.environments[0].variable_count(), 0);
    }

    #[test]
    fn test_round_trip_empty_project() {
        let project = Project::default();
        let loaded = load_project(&save_project(&project).unwrap()).unwrap();
        assert_eq!(loaded, project);
    }

    #[test]
    fn test_load_rejects_other_json_documents() {
        assert!(load_project(b"{}").is_err());
        assert!(load_project(b"{\"foo\": 1}").is_err());
        assert!(load_project(b"{\"groups\": []}").is_err());

        let collection = br#"{
            "info": {"name": "API", "schema": "https://schema.getpostman.com/json/collection/v2.1.0/collection.json"},
            "item": []
        }"#;
        assert!(load_project(collection).is_err());
    }

    #[test]
    fn test_save_is_deterministic() {
        let project = sample_project();
        assert_eq!(save_project(&project).unwrap(), save_project(&project).unwrap());
    }

    #[test]
    fn test_top_level_shape() {
        let bytes = save_project(&sample_project()).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(json["groups"].is_array());
        assert!(json["environments"].is_array());
    }

    #[test]
    fn test_load_rejects_corrupt_bytes() {
        assert!(load_project(b"{\"groups\": [").is_err());
        assert!(load_project(b"{\"groups\": 3, \"environments\": []}").is_err());
    }

    #[tokio::test]
    async fn test_write_and_read_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("project.json");
        let project = sample_project();

        write_project_file(&path, &project).await.unwrap();
        let loaded = read_project_file(&path).await.unwrap();

        assert_eq!(loaded, project);
        assert!(!temp_path_for(&path).exists());
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = read_project_file(&dir.path().join("missing.json")).await;
        assert!(matches!(result, Err(ProjectFileError::NotFound(_))));
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let path = Path::new("/tmp/work/project.json");
        assert_eq!(temp_path_for(path), Path::new("/tmp/work/project.json.tmp"));
    }
}
