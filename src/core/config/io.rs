use crate::core::config::data::{path_display, Config};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading configuration from disk.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config at {}: {source}", path_display(.path))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config at {}: {source}", path_display(.path))]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// No home directory to derive a config location from.
    #[error("Could not determine a configuration directory")]
    NoConfigDir,
}

impl Config {
    /// Loads the file at `config_path`, falling back to defaults when it does
    /// not exist.
    pub fn load_from_path(config_path: &Path) -> Result<Config, ConfigError> {
        if !config_path.exists() {
            tracing::debug!(path = %path_display(config_path), "no config file, using defaults");
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            path: config_path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source,
        })
    }

    /// Loads from `explicit_path` when given, otherwise from the platform
    /// config directory.
    pub fn load(explicit_path: Option<&Path>) -> Result<Config, ConfigError> {
        match explicit_path {
            Some(path) => Self::load_from_path(path),
            None => Self::load_from_path(&Self::get_config_path()?),
        }
    }

    pub fn get_config_path() -> Result<PathBuf, ConfigError> {
        let proj_dirs =
            ProjectDirs::from("org", "chatdesk", "chatdesk").ok_or(ConfigError::NoConfigDir)?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }
}
