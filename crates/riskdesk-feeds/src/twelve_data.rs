//! Twelve Data quotes for forex pairs and stocks.

use async_trait::async_trait;
use reqwest::Client;
use riskdesk_core::error::QuoteError;
use riskdesk_core::traits::QuoteProvider;
use riskdesk_core::types::PriceTick;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use tracing::{debug, warn};

/// Public API root.
pub const TWELVE_DATA_BASE_URL: &str = "https://api.twelvedata.com";

/// Placeholder credential accepted by Twelve Data for a handful of majors
/// (EUR/USD, USD/JPY, AAPL, ...) at a low rate limit.
pub const DEMO_API_KEY: &str = "demo";

/// Twelve Data configuration.
#[derive(Debug, Clone)]
pub struct TwelveDataConfig {
    pub base_url: String,
    pub api_key: String,
}

impl TwelveDataConfig {
    /// Create config directly with a key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Read the key from the given environment variable, falling back to the
    /// demo key when it is unset or blank.
    pub fn from_env(base_url: impl Into<String>, key_var: &str) -> Self {
        let api_key = std::env::var(key_var)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| {
                debug!(key_var, "No Twelve Data key configured, using demo key");
                DEMO_API_KEY.to_string()
            });
        Self::new(base_url, api_key)
    }

    /// Whether requests go out with the demo credential.
    pub fn is_demo(&self) -> bool {
        self.api_key == DEMO_API_KEY
    }
}

impl Default for TwelveDataConfig {
    fn default() -> Self {
        Self::new(TWELVE_DATA_BASE_URL, DEMO_API_KEY)
    }
}

/// `/price` response. Errors arrive as `{ code, message, status }`,
/// sometimes with HTTP 200.
#[derive(Debug, Deserialize)]
struct PriceResponse {
    price: Option<String>,
    message: Option<String>,
}

/// `/exchange_rate` response.
#[derive(Debug, Deserialize)]
struct ExchangeRateResponse {
    rate: Option<Decimal>,
    message: Option<String>,
}

/// Twelve Data client.
pub struct TwelveDataClient {
    config: TwelveDataConfig,
    client: Client,
}

impl TwelveDataClient {
    /// Create a new client.
    pub fn new(config: TwelveDataConfig) -> Result<Self, QuoteError> {
        let client = Client::builder()
            .build()
            .map_err(|e| QuoteError::Client(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Latest price for a symbol such as `EUR/USD` or `AAPL`.
    pub async fn price(&self, symbol: &str) -> Result<PriceTick, QuoteError> {
        let body = self.get("price", symbol).await?;
        parse_price(symbol, &body)
    }

    /// Exchange rate between two currencies.
    pub async fn exchange_rate(&self, base: &str, quote: &str) -> Result<Decimal, QuoteError> {
        let symbol = format!("{}/{}", base, quote);
        let body = self.get("exchange_rate", &symbol).await?;
        parse_exchange_rate(&symbol, &body)
    }

    async fn get(&self, endpoint: &str, symbol: &str) -> Result<String, QuoteError> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), endpoint);
        debug!(endpoint, symbol, demo = self.config.is_demo(), "Fetching Twelve Data quote");

        let resp = self
            .client
            .get(&url)
            .query(&[("symbol", symbol), ("apikey", self.config.api_key.as_str())])
            .send()
            .await
            .map_err(|e| QuoteError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(QuoteError::Status { status, body });
        }

        resp.text()
            .await
            .map_err(|e| QuoteError::Connection(e.to_string()))
    }
}

#[async_trait]
impl QuoteProvider for TwelveDataClient {
    async fn latest_price(&self, symbol: &str) -> Result<PriceTick, QuoteError> {
        self.price(symbol).await
    }

    fn name(&self) -> &str {
        "twelvedata"
    }
}

fn parse_price(symbol: &str, body: &str) -> Result<PriceTick, QuoteError> {
    let data: PriceResponse =
        serde_json::from_str(body).map_err(|e| QuoteError::Parse(e.to_string()))?;

    match (data.price, data.message) {
        (Some(raw), _) => Decimal::from_str(raw.trim())
            .map(PriceTick::new)
            .map_err(|e| QuoteError::Parse(format!("price {:?} for {}: {}", raw, symbol, e))),
        (None, Some(message)) => {
            warn!(symbol, %message, "Twelve Data error or rate limit");
            Err(QuoteError::Api(message))
        }
        (None, None) => Err(QuoteError::MissingPrice(symbol.to_string())),
    }
}

fn parse_exchange_rate(symbol: &str, body: &str) -> Result<Decimal, QuoteError> {
    let data: ExchangeRateResponse =
        serde_json::from_str(body).map_err(|e| QuoteError::Parse(e.to_string()))?;

    match (data.rate, data.message) {
        (Some(rate), _) if rate > Decimal::ZERO => Ok(rate),
        (Some(rate), _) => Err(QuoteError::NonPositivePrice {
            symbol: symbol.to_string(),
            price: rate,
        }),
        (None, Some(message)) => Err(QuoteError::Api(message)),
        (None, None) => Err(QuoteError::MissingPrice(symbol.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_price() {
        let tick = parse_price("EUR/USD", r#"{"price":"1.08515"}"#).unwrap();
        assert_eq!(tick.price, dec!(1.08515));
        assert_eq!(tick.change_24h, None);
    }

    #[test]
    fn test_parse_error_payload() {
        let body = r#"{"code":429,"message":"You have run out of API credits","status":"error"}"#;
        let err = parse_price("GBP/USD", body).unwrap_err();
        assert!(matches!(err, QuoteError::Api(msg) if msg.contains("API credits")));
    }

    #[test]
    fn test_parse_unparseable_price() {
        assert!(matches!(
            parse_price("AAPL", r#"{"price":"n/a"}"#),
            Err(QuoteError::Parse(_))
        ));
        assert!(matches!(
            parse_price("AAPL", "{}"),
            Err(QuoteError::MissingPrice(_))
        ));
    }

    #[test]
    fn test_parse_exchange_rate() {
        let body = r#"{"symbol":"USD/EUR","rate":0.92,"timestamp":1700000000}"#;
        assert_eq!(parse_exchange_rate("USD/EUR", body).unwrap(), dec!(0.92));

        let body = r#"{"code":400,"message":"symbol not found","status":"error"}"#;
        assert!(matches!(
            parse_exchange_rate("USD/XXX", body),
            Err(QuoteError::Api(_))
        ));
    }

    #[test]
    fn test_demo_key_detection() {
        assert!(TwelveDataConfig::default().is_demo());
        assert!(!TwelveDataConfig::new(TWELVE_DATA_BASE_URL, "abc123").is_demo());
    }

    #[test]
    fn test_from_env_falls_back_to_demo() {
        let config = TwelveDataConfig::from_env(
            TWELVE_DATA_BASE_URL,
            "RISKDESK_TEST_TWELVE_DATA_KEY_THAT_IS_NEVER_SET",
        );
        assert!(config.is_demo());
    }
}
