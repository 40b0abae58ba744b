//! CoinGecko spot prices for crypto assets.

use async_trait::async_trait;
use reqwest::{header, Client};
use riskdesk_core::error::QuoteError;
use riskdesk_core::traits::QuoteProvider;
use riskdesk_core::types::PriceTick;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

/// Public API root.
pub const COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Ticker to CoinGecko coin id.
const COIN_IDS: &[(&str, &str)] = &[
    ("BTC", "bitcoin"),
    ("ETH", "ethereum"),
    ("SOL", "solana"),
    ("BNB", "binancecoin"),
    ("XRP", "ripple"),
    ("ADA", "cardano"),
    ("DOGE", "dogecoin"),
    ("AVAX", "avalanche-2"),
    ("DOT", "polkadot"),
    ("LINK", "chainlink"),
    ("MATIC", "matic-network"),
    ("LTC", "litecoin"),
    ("UNI", "uniswap"),
];

/// Resolve a ticker to a CoinGecko id.
///
/// Unknown tickers are lowercased, which matches CoinGecko ids for many
/// smaller coins and fails upstream otherwise.
pub fn coin_id(symbol: &str) -> String {
    COIN_IDS
        .iter()
        .find(|(ticker, _)| *ticker == symbol)
        .map(|(_, id)| id.to_string())
        .unwrap_or_else(|| symbol.to_lowercase())
}

/// CoinGecko configuration.
#[derive(Debug, Clone)]
pub struct CoinGeckoConfig {
    pub base_url: String,
    /// Optional demo-plan key; the public endpoint works without one.
    pub api_key: Option<String>,
}

impl CoinGeckoConfig {
    /// Create config directly.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Read the key from the given environment variable, if set.
    pub fn from_env(base_url: impl Into<String>, key_var: &str) -> Self {
        let api_key = std::env::var(key_var)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        Self::new(base_url, api_key)
    }
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self::new(COINGECKO_BASE_URL, None)
    }
}

/// `/simple/price` entry for one coin.
#[derive(Debug, Deserialize)]
struct SimplePrice {
    usd: Option<Decimal>,
    usd_24h_change: Option<Decimal>,
}

/// CoinGecko client.
pub struct CoinGeckoClient {
    config: CoinGeckoConfig,
    client: Client,
}

impl CoinGeckoClient {
    /// Create a new client.
    pub fn new(config: CoinGeckoConfig) -> Result<Self, QuoteError> {
        let mut headers = header::HeaderMap::new();
        if let Some(key) = &config.api_key {
            headers.insert(
                API_KEY_HEADER,
                header::HeaderValue::from_str(key)
                    .map_err(|e| QuoteError::Client(e.to_string()))?,
            );
        }

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| QuoteError::Client(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Spot price in USD with 24h change for a CoinGecko id.
    pub async fn simple_price(&self, coin_id: &str) -> Result<PriceTick, QuoteError> {
        let url = format!("{}/simple/price", self.config.base_url.trim_end_matches('/'));
        debug!(coin_id, "Fetching CoinGecko spot price");

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("ids", coin_id),
                ("vs_currencies", "usd"),
                ("include_24hr_change", "true"),
            ])
            .send()
            .await
            .map_err(|e| QuoteError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(QuoteError::Status { status, body });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| QuoteError::Connection(e.to_string()))?;
        parse_simple_price(coin_id, &body)
    }
}

#[async_trait]
impl QuoteProvider for CoinGeckoClient {
    async fn latest_price(&self, symbol: &str) -> Result<PriceTick, QuoteError> {
        self.simple_price(&coin_id(symbol)).await
    }

    fn name(&self) -> &str {
        "coingecko"
    }
}

fn parse_simple_price(coin_id: &str, body: &str) -> Result<PriceTick, QuoteError> {
    let mut data: HashMap<String, SimplePrice> =
        serde_json::from_str(body).map_err(|e| QuoteError::Parse(e.to_string()))?;

    let entry = data
        .remove(coin_id)
        .ok_or_else(|| QuoteError::MissingPrice(coin_id.to_string()))?;
    let price = entry
        .usd
        .ok_or_else(|| QuoteError::MissingPrice(coin_id.to_string()))?;

    Ok(PriceTick {
        price,
        change_24h: entry.usd_24h_change,
    })
}
