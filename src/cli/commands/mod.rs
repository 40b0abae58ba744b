//! CLI command implementations.

pub mod convert;
pub mod price;
pub mod size;
pub mod symbols;
pub mod tools;
pub mod validate;
pub mod watch;

use anyhow::{Context, Result};
use riskdesk_calc::parse_amount;
use riskdesk_config::AppConfig;
use riskdesk_data::{PriceCache, PriceService};
use riskdesk_feeds::{CoinGeckoClient, CoinGeckoConfig, TwelveDataClient, TwelveDataConfig};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::warn;

/// Twelve Data settings from configuration and the environment.
pub fn twelve_data_config(config: &AppConfig) -> TwelveDataConfig {
    let td = TwelveDataConfig::from_env(
        config.providers.twelve_data_base_url.clone(),
        &config.providers.twelve_data_api_key_env,
    );
    if td.is_demo() {
        warn!(
            key_var = %config.providers.twelve_data_api_key_env,
            "Using the Twelve Data demo key; only a few symbols will resolve"
        );
    }
    td
}

/// Build the cached price service from configuration.
pub fn price_service(config: &AppConfig) -> Result<Arc<PriceService>> {
    let crypto = CoinGeckoClient::new(CoinGeckoConfig::from_env(
        config.providers.coingecko_base_url.clone(),
        &config.providers.coingecko_api_key_env,
    ))
    .context("Failed to create CoinGecko client")?;
    let market = TwelveDataClient::new(twelve_data_config(config))
        .context("Failed to create Twelve Data client")?;

    let cache = Arc::new(PriceCache::new(config.cache.ttl()));
    Ok(Arc::new(PriceService::new(
        Arc::new(crypto),
        Arc::new(market),
        cache,
    )))
}

/// Parse an optional numeric argument; blank or unparseable input is absent.
pub fn amount(raw: Option<&str>) -> Option<Decimal> {
    raw.and_then(parse_amount)
}

/// Parse a numeric argument, treating bad input as zero.
pub fn amount_or_zero(raw: Option<&str>) -> Decimal {
    amount(raw).unwrap_or(Decimal::ZERO)
}
