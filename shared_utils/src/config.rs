use std::path::PathBuf;

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors related to application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable required by the application is not set.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// An environment variable is set but its value cannot be used.
    #[error("Invalid value for environment variable {name}: {value:?}")]
    InvalidEnvVar { name: String, value: String },

    /// The config file could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file is not valid TOML for the expected shape.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Reads a TOML document from `path` and deserializes it into `T`.
pub fn read_toml<T: DeserializeOwned>(path: impl Into<PathBuf>) -> Result<T, ConfigError> {
    let path = path.into();
    let content =
        std::fs::read_to_string(&path).map_err(|source| ConfigError::Read { path, source })?;
    Ok(toml::from_str(&content)?)
}
