//! Provider abstraction for daily quote sources.
//!
//! This module defines the [`QuoteSource`] trait, the single seam between the
//! pipeline and the network. [`yahoo_chart::YahooChartProvider`] is the
//! production implementation; tests substitute an in-memory source that hands
//! back canned [`RawQuoteResponse`]s.
//!
//! The trait is designed for async usage and supports dynamic dispatch
//! (`dyn QuoteSource`).
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use quote_history::models::request_params::ChartRequest;
//! use quote_history::providers::{ProviderError, QuoteSource, RawQuoteResponse};
//!
//! struct Offline;
//!
//! #[async_trait]
//! impl QuoteSource for Offline {
//!     async fn fetch_chart(
//!         &self,
//!         _request: &ChartRequest,
//!     ) -> Result<RawQuoteResponse, ProviderError> {
//!         Ok(RawQuoteResponse::default())
//!     }
//! }
//! ```

pub mod yahoo_chart;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::models::request_params::ChartRequest;

pub use yahoo_chart::response::RawQuoteResponse;

/// Fetches the raw chart payload for one symbol and date range.
///
/// Implementations issue at most one outbound request per call and never
/// retry; retry policy belongs to the caller.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetches the provider payload for `request`.
    ///
    /// # Returns
    ///
    /// * `Ok(RawQuoteResponse)` - The decoded but not yet validated payload.
    /// * `Err(ProviderError)` - Transport failure, non-2xx status, undecodable
    ///   body, or an error reported inside the payload.
    async fn fetch_chart(&self, request: &ChartRequest) -> Result<RawQuoteResponse, ProviderError>;
}

/// Errors that can occur during the creation of a provider instance
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The configured endpoint is not an absolute http(s) URL.
    #[snafu(display("Invalid base URL {url:?}: {message}"))]
    InvalidBaseUrl {
        url: String,
        message: String,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `QuoteSource` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// The request never produced a complete response (connect failure,
    /// timeout, interrupted body).
    #[snafu(display("API request failed: {source}"))]
    Transport {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The provider answered with a non-success HTTP status.
    #[snafu(display("API returned HTTP {status}: {message}"))]
    Status {
        status: u16,
        message: String,
        backtrace: Backtrace,
    },

    /// The body is not JSON of the chart shape.
    #[snafu(display("Failed to decode API response: {source}"))]
    Decode {
        source: serde_json::Error,
        backtrace: Backtrace,
    },

    /// A success response whose payload carries the provider's own error
    /// object (e.g. unknown symbol).
    #[snafu(display("API error [{code}]: {description}"))]
    Api {
        code: String,
        description: String,
        backtrace: Backtrace,
    },
}

impl ProviderError {
    /// HTTP status for [`ProviderError::Status`], `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
