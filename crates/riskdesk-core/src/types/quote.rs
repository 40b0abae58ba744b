//! Live price quotes.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AssetClass;

/// Raw price reported by a provider, before it is stamped and cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceTick {
    /// Last price in USD (or quote currency for forex pairs)
    pub price: Decimal,
    /// 24h change in percent, when the provider reports it
    pub change_24h: Option<Decimal>,
}

impl PriceTick {
    /// Create a tick without 24h change information.
    pub fn new(price: Decimal) -> Self {
        Self {
            price,
            change_24h: None,
        }
    }

    /// Attach a 24h change.
    pub fn with_change(mut self, change_24h: Decimal) -> Self {
        self.change_24h = Some(change_24h);
        self
    }
}

/// A successfully fetched live price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Symbol as requested (e.g. `EUR/USD`, `BTC`, `AAPL`)
    pub symbol: String,
    /// Asset class the symbol was resolved under
    pub asset_class: AssetClass,
    /// Current price, always positive
    pub price: Decimal,
    /// 24h change in percent
    pub change_24h: Option<Decimal>,
    /// When the quote was fetched
    pub fetched_at: DateTime<Utc>,
}

impl Quote {
    /// Stamp a provider tick.
    pub fn from_tick(
        symbol: impl Into<String>,
        asset_class: AssetClass,
        tick: PriceTick,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            asset_class,
            price: tick.price,
            change_24h: tick.change_24h,
            fetched_at,
        }
    }

    /// Age of the quote at `now`.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.fetched_at
    }

    /// Whether the quote is strictly younger than `ttl` at `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age(now) < ttl
    }
}
