//! Daily closing prices for one instrument, normalized to calendar days.
//!
//! The pipeline is fetch → build → look up:
//!
//! - [`providers`]: the [`QuoteSource`] seam and the Yahoo chart provider;
//! - [`series::build`]: payload to an ascending [`QuoteSeries`];
//! - [`series::lookup`]: as-of and strictly-before lookups by binary search;
//! - [`performance`]: trailing ratios over the fixed [`Horizon`] list;
//! - [`service::QuoteHistory`]: the caller-facing queries, with an injected
//!   [`PriceCache`].

pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod performance;
pub mod providers;
pub mod series;
pub mod service;

pub use cache::{CacheEntry, InMemoryPriceCache, NoCache, PriceCache};
pub use config::Config;
pub use errors::{Error, Result};
pub use models::{
    calendar_day::{CalendarDay, DateLike, normalize},
    quote_series::{DayClose, QuoteSeries},
    request_params::ChartRequest,
};
pub use performance::{Horizon, performances, performances_at};
pub use providers::{ProviderError, QuoteSource, RawQuoteResponse, yahoo_chart::YahooChartProvider};
pub use series::{build, close_at, close_before};
pub use service::QuoteHistory;
