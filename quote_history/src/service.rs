//! The three queries callers actually ask.
//!
//! [`QuoteHistory`] ties a [`QuoteSource`] to a [`PriceCache`]. Each query
//! makes at most one provider call, builds a fresh [`QuoteSeries`] and
//! answers from it; nothing but the cache outlives a call.

use std::{path::Path, sync::Arc};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::{
    cache::{CacheEntry, InMemoryPriceCache, NoCache, PriceCache, cache_key},
    config::Config,
    errors::{Error, Result},
    models::{
        calendar_day::{CalendarDay, DateLike, normalize},
        quote_series::QuoteSeries,
        request_params::{ChartRequest, validate_symbol},
    },
    performance,
    providers::{QuoteSource, yahoo_chart::YahooChartProvider},
    series::build,
};

/// How many days before the target an as-of price request reaches back, so
/// weekends and short holidays still find a close.
pub const PRICE_LOOKBACK_DAYS: u32 = 5;

pub struct QuoteHistory {
    source: Box<dyn QuoteSource>,
    cache: Arc<dyn PriceCache>,
}

impl QuoteHistory {
    pub fn new(source: impl QuoteSource + 'static, cache: Arc<dyn PriceCache>) -> Self {
        Self {
            source: Box::new(source),
            cache,
        }
    }

    /// A history that never caches prices.
    pub fn without_cache(source: impl QuoteSource + 'static) -> Self {
        Self::new(source, Arc::new(NoCache))
    }

    /// The production wiring: Yahoo chart provider plus an in-memory cache.
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = YahooChartProvider::with_config(config)?;
        Ok(Self::new(provider, Arc::new(InMemoryPriceCache::new())))
    }

    /// [`from_config`](Self::from_config) with the config read from an
    /// optional TOML file plus `QUOTE_HISTORY_*` environment overrides.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = Config::load(config_path)?;
        Self::from_config(&config)
    }

    async fn fetch_series(&self, request: &ChartRequest) -> Result<QuoteSeries> {
        let raw = self.source.fetch_chart(request).await?;
        build(&raw)
    }

    /// Close as of `date` (today when `None`): the last close on or before that
    /// day, or `None` if the provider has nothing in the preceding
    /// [`PRICE_LOOKBACK_DAYS`].
    ///
    /// Answers are cached per symbol and day, including the "no data" answer.
    pub async fn price_of(&self, symbol: &str, date: Option<CalendarDay>) -> Result<Option<f64>> {
        let symbol = validate_symbol(symbol)?;
        let target = date.unwrap_or_else(CalendarDay::today);
        let key = cache_key(symbol, target);

        match self.cache.get(&key) {
            Some(CacheEntry::NoData) => {
                debug!(%key, "price cache hit (no data)");
                return Ok(None);
            }
            Some(CacheEntry::Price(raw)) => match raw.parse::<f64>() {
                Ok(price) => {
                    debug!(%key, price, "price cache hit");
                    return Ok(Some(price));
                }
                Err(_) => warn!(%key, value = %raw, "ignoring unparseable cached price"),
            },
            None => debug!(%key, "price cache miss"),
        }

        let from = target.checked_days_back(PRICE_LOOKBACK_DAYS).ok_or_else(|| {
            Error::invalid(format!("{target} leaves no room for a {PRICE_LOOKBACK_DAYS}-day lookback"))
        })?;
        let request = ChartRequest::new(symbol, Some(from), Some(target))?;
        let close = self.fetch_series(&request).await?.close_at(target);

        self.cache.put(&key, CacheEntry::from_close(close));
        Ok(close)
    }

    /// [`price_of`](Self::price_of) for any date-like value.
    pub async fn price_on<D: DateLike>(&self, symbol: &str, date: D) -> Result<Option<f64>> {
        self.price_of(symbol, Some(normalize(date))).await
    }

    /// The daily close series over a range; see [`ChartRequest::new`] for how
    /// omitted bounds are filled in.
    pub async fn fetch_quotes(
        &self,
        symbol: &str,
        from: Option<CalendarDay>,
        to: Option<CalendarDay>,
    ) -> Result<QuoteSeries> {
        let request = ChartRequest::new(symbol, from, to)?;
        self.fetch_series(&request).await
    }

    /// Trailing performance for every [`Horizon`](performance::Horizon),
    /// relative to now.
    pub async fn performances(&self, symbol: &str) -> Result<Vec<Option<f64>>> {
        self.performances_at(symbol, Utc::now()).await
    }

    /// [`performances`](Self::performances) with an explicit clock. The fetched
    /// range is the default lookback ending on `now`'s day.
    pub async fn performances_at(&self, symbol: &str, now: DateTime<Utc>) -> Result<Vec<Option<f64>>> {
        let request = ChartRequest::new_at(symbol, None, None, now)?;
        let series = self.fetch_series(&request).await?;
        performance::performances_at(&series, now)
    }
}
