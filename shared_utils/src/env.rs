use std::str::FromStr;

use crate::config::ConfigError;

/// Reads an environment variable, returning a structured error if it's missing.
///
/// This is a thin wrapper around `std::env::var` that provides a more
/// ergonomic and specific error type for missing variables.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Reads an optional override from the environment.
///
/// Returns `Ok(None)` when the variable is unset or blank, and an
/// [`ConfigError::InvalidEnvVar`] when it is set but does not parse as `T`.
pub fn env_override<T: FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    let Ok(raw) = get_env_var(name) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: raw.clone(),
        })
}
