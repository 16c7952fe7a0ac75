//! Memoization of single-day prices.
//!
//! [`PriceCache`] is injected into [`QuoteHistory`](crate::service::QuoteHistory)
//! rather than living in a global, so tests can swap in [`NoCache`] or inspect
//! an [`InMemoryPriceCache`]. A cache only ever saves work: results with and
//! without one are identical.
//!
//! Implementation notes for [`InMemoryPriceCache`]:
//! - Uses `arc-swap` so readers take one atomic load and never block.
//! - Writers clone the map and swap it in with `rcu`; concurrent writers to
//!   the same key resolve last-writer-wins, which is fine because every value
//!   is derived from the same provider data.
//! - The map is cloned per write. Price lookups are rare enough that this has
//!   not mattered.

use std::{collections::HashMap, sync::Arc};

use arc_swap::ArcSwap;

use crate::models::calendar_day::CalendarDay;

/// What a cache slot holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEntry {
    /// A close price, as its decimal string.
    Price(String),
    /// The provider had no close on or before that day.
    NoData,
}

impl CacheEntry {
    pub fn from_close(close: Option<f64>) -> Self {
        match close {
            Some(c) => CacheEntry::Price(c.to_string()),
            None => CacheEntry::NoData,
        }
    }
}

/// Key format shared by all caches: `"{symbol}:{YYYY-MM-DD}"`.
pub fn cache_key(symbol: &str, day: CalendarDay) -> String {
    format!("{symbol}:{day}")
}

pub trait PriceCache: Send + Sync {
    fn get(&self, key: &str) -> Option<CacheEntry>;
    fn put(&self, key: &str, entry: CacheEntry);
}

/// Process-lifetime in-memory cache.
pub struct InMemoryPriceCache {
    entries: ArcSwap<HashMap<String, CacheEntry>>,
}

impl InMemoryPriceCache {
    pub fn new() -> Self {
        Self {
            entries: ArcSwap::from_pointee(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.load().is_empty()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries.store(Arc::new(HashMap::new()));
    }

    /// The current contents, for callers that need to iterate.
    pub fn snapshot(&self) -> Arc<HashMap<String, CacheEntry>> {
        self.entries.load_full()
    }
}

impl Default for InMemoryPriceCache {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceCache for InMemoryPriceCache {
    fn get(&self, key: &str) -> Option<CacheEntry> {
        self.entries.load().get(key).cloned()
    }

    fn put(&self, key: &str, entry: CacheEntry) {
        self.entries.rcu(|current| {
            let mut next: HashMap<String, CacheEntry> = (**current).clone();
            next.insert(key.to_string(), entry.clone());
            next
        });
    }
}

/// A cache that never remembers anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl PriceCache for NoCache {
    fn get(&self, _key: &str) -> Option<CacheEntry> {
        None
    }

    fn put(&self, _key: &str, _entry: CacheEntry) {}
}
