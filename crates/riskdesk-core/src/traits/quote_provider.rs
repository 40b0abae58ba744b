//! Quote provider trait definition.

use crate::error::QuoteError;
use crate::types::PriceTick;
use async_trait::async_trait;

/// Trait for upstream price sources.
///
/// Implementations perform exactly one upstream request per call; caching
/// and failure policy live in the price service.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Get the latest price for a symbol.
    ///
    /// # Arguments
    /// * `symbol` - Symbol in the caller's notation (`EUR/USD`, `BTC`, `AAPL`)
    ///
    /// # Returns
    /// The reported price. A zero or negative price is returned as-is; the
    /// caller decides what counts as a usable quote.
    async fn latest_price(&self, symbol: &str) -> Result<PriceTick, QuoteError>;

    /// Get the provider name.
    fn name(&self) -> &str;
}
