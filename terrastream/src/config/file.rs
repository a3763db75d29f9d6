//! Configuration file handling for ~/.terrastream/config.ini.
//!
//! Parsing lives in [`super::parser`], serialization in [`super::writer`].

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use super::source::SourceConfig;
use super::streaming::StreamingConfig;
use crate::logging::{default_log_dir, default_log_file};

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub directory: PathBuf,
    pub file: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(default_log_dir()),
            file: default_log_file().to_string(),
        }
    }
}

/// Everything config.ini can set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub streaming: StreamingConfig,
    pub sources: SourceConfig,
    pub logging: LoggingSettings,
}

impl ConfigFile {
    /// Load configuration from the default path (~/.terrastream/config.ini).
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }
}

/// Get the path to the config directory (~/.terrastream).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".terrastream")
}

/// Get the path to the config file (~/.terrastream/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.ini");

        let config = ConfigFile::load_from(&config_path).unwrap();

        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.streaming.zoom(), DEFAULT_ZOOM);
    }

    #[test]
    fn test_save_then_load_preserves_values() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sub").join("config.ini");
        let config = ConfigFile {
            streaming: StreamingConfig::new()
                .with_cell_size(512.0)
                .with_adjacent_layers(2)
                .with_start(46.5, 7.25)
                .with_generate_osm(true),
            sources: SourceConfig::new().with_timeout_secs(12),
            logging: LoggingSettings {
                directory: PathBuf::from("/tmp/terrastream-logs"),
                file: "run.log".to_string(),
            },
        };

        config.save_to(&config_path).unwrap();
        let loaded = ConfigFile::load_from(&config_path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_file_path_under_home() {
        let path = config_file_path();
        assert!(path.ends_with(".terrastream/config.ini"));
    }
}
