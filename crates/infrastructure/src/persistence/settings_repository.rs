//! Client settings persistence.
//!
//! Stores settings in the platform-specific config directory:
//! - Linux: ~/.config/postline/settings.json
//! - macOS: ~/Library/Application Support/postline/settings.json
//! - Windows: %APPDATA%/postline/settings.json

use std::path::{Path, PathBuf};

use postline_domain::ClientSettings;
use tokio::fs;

use crate::serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// Could not determine config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Repository for client settings persistence.
#[derive(Debug, Clone, Default)]
pub struct SettingsRepository;

impl SettingsRepository {
    /// Creates a new settings repository.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("postline"))
    }

    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.json"))
    }

    /// Loads settings from the config directory.
    ///
    /// Returns default settings if the file doesn't exist or no config
    /// directory is available.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or decoded.
    pub async fn load(&self) -> Result<ClientSettings, SettingsError> {
        let Some(path) = Self::settings_path() else {
            tracing::debug!("No config directory, using default settings");
            return Ok(ClientSettings::default());
        };
        self.load_from(&path).await
    }

    /// Loads settings from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or decoded.
    pub async fn load_from(&self, path: &Path) -> Result<ClientSettings, SettingsError> {
        let content = match fs::read(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Settings file missing, using defaults");
                return Ok(ClientSettings::default());
            }
            Err(e) => return Err(e.into()),
        };

        let settings = from_json_bytes(&content)?;
        Ok(settings)
    }

    /// Saves settings to the config directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no config directory is available or writing fails.
    pub async fn save(&self, settings: &ClientSettings) -> Result<(), SettingsError> {
        let Some(path) = Self::settings_path() else {
            return Err(SettingsError::NoConfigDir);
        };
        self.save_to(&path, settings).await
    }

    /// Saves settings to an explicit path, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub async fn save_to(&self, path: &Path, settings: &ClientSettings) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = to_json_stable_bytes(settings)?;
        fs::write(path, content).await?;

        Ok(())
    }

    /// Returns the path where settings are stored, if available.
    #[must_use]
    pub fn get_settings_path() -> Option<PathBuf> {
        Self::settings_path()
    }
}
