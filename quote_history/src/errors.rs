use shared_utils::ConfigError;
use thiserror::Error;

use crate::providers::{ProviderError, ProviderInitError};

/// The unified error type for the `quote_history` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A caller-supplied argument was rejected before any network call
    /// (empty symbol, inverted or half-specified date range).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The provider could not be reached or answered with a failure.
    #[error("Fetch failed: {0}")]
    Fetch(#[from] ProviderError),

    /// The provider's JSON parsed but does not have the structure of a chart.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// A computation needs at least one close and the series has none.
    #[error("Empty series: {0}")]
    EmptySeries(String),

    /// An error related to configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The provider client could not be constructed.
    #[error("Provider initialization error: {0}")]
    ProviderInit(#[from] ProviderInitError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
