//! Cached price lookups across both upstream providers.

use riskdesk_core::traits::QuoteProvider;
use riskdesk_core::types::{AssetClass, Quote};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cache::PriceCache;

/// Resolves `(symbol, asset class)` to a live quote.
///
/// Crypto goes to `crypto`, forex and stocks go to `market`. Every failure
/// is logged and reported as `None`; callers must read `None` as "no live
/// price", never as zero.
pub struct PriceService {
    crypto: Arc<dyn QuoteProvider>,
    market: Arc<dyn QuoteProvider>,
    cache: Arc<PriceCache>,
}

impl PriceService {
    /// Create a new price service.
    pub fn new(
        crypto: Arc<dyn QuoteProvider>,
        market: Arc<dyn QuoteProvider>,
        cache: Arc<PriceCache>,
    ) -> Self {
        Self {
            crypto,
            market,
            cache,
        }
    }

    /// Shared quote cache.
    pub fn cache(&self) -> &PriceCache {
        &self.cache
    }

    fn provider_for(&self, asset_class: AssetClass) -> &dyn QuoteProvider {
        match asset_class {
            AssetClass::Crypto => self.crypto.as_ref(),
            AssetClass::Forex | AssetClass::Stocks => self.market.as_ref(),
        }
    }

    /// Fetch the current price, from cache when fresh.
    pub async fn fetch_price(&self, symbol: &str, asset_class: AssetClass) -> Option<Quote> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            debug!(%asset_class, "Empty symbol, skipping price fetch");
            return None;
        }

        if let Some(quote) = self.cache.get(asset_class, symbol) {
            debug!(symbol, %asset_class, price = %quote.price, "Price cache hit");
            return Some(quote);
        }

        let provider = self.provider_for(asset_class);
        let requested_at = self.cache.now();

        match provider.latest_price(symbol).await {
            Ok(tick) if tick.price > Decimal::ZERO => {
                let quote = Quote::from_tick(symbol, asset_class, tick, requested_at);
                info!(
                    symbol,
                    %asset_class,
                    provider = provider.name(),
                    price = %quote.price,
                    "Fetched live price"
                );
                self.cache.put(quote.clone());
                Some(quote)
            }
            Ok(tick) => {
                warn!(
                    symbol,
                    %asset_class,
                    provider = provider.name(),
                    price = %tick.price,
                    "Provider returned a non-positive price"
                );
                None
            }
            Err(e) => {
                warn!(
                    symbol,
                    %asset_class,
                    provider = provider.name(),
                    error = %e,
                    "Error fetching price"
                );
                None
            }
        }
    }

    /// Fetch unless `token` is cancelled first. A result that completes
    /// after cancellation is dropped.
    pub async fn fetch_price_cancellable(
        &self,
        symbol: &str,
        asset_class: AssetClass,
        token: &CancellationToken,
    ) -> Option<Quote> {
        tokio::select! {
            biased;
            _ = token.cancelled() => None,
            quote = self.fetch_price(symbol, asset_class) => {
                if token.is_cancelled() {
                    None
                } else {
                    quote
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedProvider;
    use chrono::{Duration, TimeZone, Utc};
    use riskdesk_core::traits::ManualClock;
    use rust_decimal_macros::dec;

    struct Fixture {
        clock: Arc<ManualClock>,
        crypto: Arc<ScriptedProvider>,
        market: Arc<ScriptedProvider>,
        service: PriceService,
    }

    fn fixture() -> Fixture {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 2, 1, 14, 0, 0).unwrap(),
        ));
        let cache = Arc::new(PriceCache::with_clock(Duration::seconds(30), clock.clone()));
        let crypto = Arc::new(
            ScriptedProvider::new("crypto")
                .with_price("BTC", dec!(50000))
                .with_price("DOGE", dec!(0)),
        );
        let market = Arc::new(
            ScriptedProvider::new("market")
                .with_price("EUR/USD", dec!(1.085))
                .with_price("AAPL", dec!(190.5))
                .with_price("LINK", dec!(42)),
        );
        let service = PriceService::new(crypto.clone(), market.clone(), cache);
        Fixture {
            clock,
            crypto,
            market,
            service,
        }
    }

    #[tokio::test]
    async fn test_second_fetch_within_ttl_hits_cache() {
        let f = fixture();

        let first = f.service.fetch_price("BTC", AssetClass::Crypto).await.unwrap();
        f.clock.advance(Duration::seconds(10));
        let second = f.service.fetch_price("BTC", AssetClass::Crypto).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(f.crypto.call_count(), 1);

        f.clock.advance(Duration::seconds(21));
        let third = f.service.fetch_price("BTC", AssetClass::Crypto).await.unwrap();
        assert_eq!(f.crypto.call_count(), 2);
        assert_eq!(third.fetched_at, first.fetched_at + Duration::seconds(31));
    }

    #[tokio::test]
    async fn test_routes_by_asset_class() {
        let f = fixture();

        assert!(f.service.fetch_price("EUR/USD", AssetClass::Forex).await.is_some());
        assert!(f.service.fetch_price("AAPL", AssetClass::Stocks).await.is_some());
        assert!(f.service.fetch_price("BTC", AssetClass::Crypto).await.is_some());

        assert_eq!(f.market.calls(), vec!["EUR/USD", "AAPL"]);
        assert_eq!(f.crypto.calls(), vec!["BTC"]);
    }

    #[tokio::test]
    async fn test_same_symbol_different_class_is_separate() {
        let f = fixture();

        assert!(f.service.fetch_price("LINK", AssetClass::Stocks).await.is_some());
        // Not scripted on the crypto side
        assert!(f.service.fetch_price("LINK", AssetClass::Crypto).await.is_none());
        assert_eq!(f.crypto.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failure_returns_none_and_skips_cache() {
        let f = fixture();

        assert!(f.service.fetch_price("GBP/USD", AssetClass::Forex).await.is_none());
        assert!(f.service.cache().is_empty());

        // Failures are not cached: the next call goes upstream again
        assert!(f.service.fetch_price("GBP/USD", AssetClass::Forex).await.is_none());
        assert_eq!(f.market.call_count(), 2);
    }

    #[tokio::test]
    async fn test_non_positive_price_is_absent() {
        let f = fixture();

        assert!(f.service.fetch_price("DOGE", AssetClass::Crypto).await.is_none());
        assert!(f.service.cache().get(AssetClass::Crypto, "DOGE").is_none());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_nothing_stale() {
        let f = fixture();
        assert!(f.service.fetch_price("EUR/USD", AssetClass::Forex).await.is_some());

        f.market.fail("EUR/USD");
        f.clock.advance(Duration::seconds(31));
        assert!(f.service.fetch_price("EUR/USD", AssetClass::Forex).await.is_none());
    }

    #[tokio::test]
    async fn test_empty_symbol_skips_io() {
        let f = fixture();
        assert!(f.service.fetch_price("  ", AssetClass::Stocks).await.is_none());
        assert_eq!(f.market.call_count(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_token_discards_result() {
        let f = fixture();
        let token = CancellationToken::new();
        token.cancel();

        let quote = f
            .service
            .fetch_price_cancellable("BTC", AssetClass::Crypto, &token)
            .await;
        assert!(quote.is_none());
        assert_eq!(f.crypto.call_count(), 0);
    }
}
