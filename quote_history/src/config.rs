//! Runtime configuration for the quote provider client.
//!
//! Values come from three layers, later ones winning:
//! 1. built-in defaults ([`Config::default`]);
//! 2. an optional TOML file ([`Config::from_file`]), in which every key is optional;
//! 3. `QUOTE_HISTORY_*` environment variables ([`Config::with_env_overrides`]).
//!
//! ```toml
//! base_url = "https://query2.finance.yahoo.com/v8/finance/chart"
//! timeout_secs = 10
//! requests_per_second = 1
//! ```

use std::{num::NonZeroU32, path::Path, time::Duration};

use nonzero_ext::nonzero;
use serde::Deserialize;
use shared_utils::{
    ConfigError,
    config::read_toml,
    env::env_override,
};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// The chart endpoint refuses requests without a browser-like agent.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Safari/537.36";

pub const ENV_BASE_URL: &str = "QUOTE_HISTORY_BASE_URL";
pub const ENV_USER_AGENT: &str = "QUOTE_HISTORY_USER_AGENT";
pub const ENV_TIMEOUT_SECS: &str = "QUOTE_HISTORY_TIMEOUT_SECS";
pub const ENV_REQUESTS_PER_SECOND: &str = "QUOTE_HISTORY_REQUESTS_PER_SECOND";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Chart endpoint; the symbol is appended as the last path segment.
    pub base_url: String,

    pub user_agent: String,

    /// Whole-request timeout handed to the HTTP client.
    pub timeout_secs: u64,

    /// Outbound request budget enforced by the provider's rate limiter.
    pub requests_per_second: NonZeroU32,

    /// Locale parameters sent with every request.
    pub lang: String,
    pub region: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            requests_per_second: nonzero!(2u32),
            lang: "en-US".to_string(),
            region: "US".to_string(),
        }
    }
}

impl Config {
    /// Reads a TOML config file; keys it omits keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        read_toml(path.as_ref())
    }

    /// Applies `QUOTE_HISTORY_*` environment overrides on top of `self`.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(base_url) = env_override::<String>(ENV_BASE_URL)? {
            self.base_url = base_url;
        }
        if let Some(user_agent) = env_override::<String>(ENV_USER_AGENT)? {
            self.user_agent = user_agent;
        }
        if let Some(timeout_secs) = env_override(ENV_TIMEOUT_SECS)? {
            self.timeout_secs = timeout_secs;
        }
        if let Some(rps) = env_override(ENV_REQUESTS_PER_SECOND)? {
            self.requests_per_second = rps;
        }
        Ok(self)
    }

    /// Defaults, then the file if one is given, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.with_env_overrides()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
