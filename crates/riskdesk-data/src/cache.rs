//! Short-lived quote cache.

use chrono::{DateTime, Duration, Utc};
use riskdesk_core::traits::{Clock, SystemClock};
use riskdesk_core::types::{AssetClass, Quote};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Default time-to-live for cached quotes.
pub const DEFAULT_TTL_SECS: i64 = 30;

/// Cache key. The same ticker can exist in more than one asset class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub asset_class: AssetClass,
    pub symbol: String,
}

impl CacheKey {
    pub fn new(asset_class: AssetClass, symbol: impl Into<String>) -> Self {
        Self {
            asset_class,
            symbol: symbol.into(),
        }
    }
}

/// In-memory quote cache keyed by `(asset class, symbol)`.
///
/// Writes are last-write-wins per key. The lock is never held across an
/// await point.
#[derive(Debug)]
pub struct PriceCache {
    entries: RwLock<HashMap<CacheKey, Quote>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl PriceCache {
    /// Create a cache on the system clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Create a cache on a custom clock.
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Time-to-live of entries.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current time on the cache clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Get a quote younger than the TTL.
    pub fn get(&self, asset_class: AssetClass, symbol: &str) -> Option<Quote> {
        let key = CacheKey::new(asset_class, symbol);
        let now = self.now();
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(&key)
            .filter(|quote| quote.is_fresh(now, self.ttl))
            .cloned()
    }

    /// Store a quote, replacing any previous entry for its key.
    pub fn put(&self, quote: Quote) {
        let key = CacheKey::new(quote.asset_class, quote.symbol.clone());
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key, quote);
    }

    /// Drop the entry for a key.
    pub fn invalidate(&self, asset_class: AssetClass, symbol: &str) -> Option<Quote> {
        let key = CacheKey::new(asset_class, symbol);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(&key)
    }

    /// Drop entries older than the TTL. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.now();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, quote| quote.is_fresh(now, self.ttl));
        before - entries.len()
    }

    /// Clear all entries.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PriceCache {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_TTL_SECS))
    }
}
