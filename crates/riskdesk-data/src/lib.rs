//! Live price data for riskdesk.
//!
//! Wraps the upstream providers with a short-lived cache and a debounced,
//! cancellable tracker for the currently selected instrument.

mod cache;
mod service;
#[cfg(test)]
mod testing;
mod tracker;

pub use cache::{CacheKey, PriceCache, DEFAULT_TTL_SECS};
pub use service::PriceService;
pub use tracker::{LivePrice, LivePriceTracker, DEFAULT_DEBOUNCE};
