//! Asset class definitions and the built-in instrument catalog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RiskdeskError;

const FOREX_PAIRS: &[&str] = &[
    "EUR/USD", "GBP/USD", "USD/JPY", "AUD/USD", "USD/CAD", "USD/CHF", "NZD/USD", "EUR/GBP",
    "EUR/JPY", "GBP/JPY", "AUD/JPY", "CAD/JPY", "CHF/JPY", "NZD/JPY", "XAU/USD",
];

const CRYPTO_ASSETS: &[&str] = &[
    "BTC", "ETH", "SOL", "BNB", "XRP", "ADA", "DOGE", "AVAX", "DOT", "LINK",
];

const STOCK_ASSETS: &[&str] = &["AAPL", "MSFT", "GOOGL", "AMZN", "TSLA", "NVDA", "META", "NFLX"];

/// Market an instrument trades in. Decides both the quote provider and the
/// sizing formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    #[default]
    Forex,
    Crypto,
    Stocks,
}

impl AssetClass {
    /// All asset classes.
    pub fn all() -> &'static [AssetClass] {
        &[AssetClass::Forex, AssetClass::Crypto, AssetClass::Stocks]
    }

    /// Instruments offered for this class.
    pub fn symbols(&self) -> &'static [&'static str] {
        match self {
            AssetClass::Forex => FOREX_PAIRS,
            AssetClass::Crypto => CRYPTO_ASSETS,
            AssetClass::Stocks => STOCK_ASSETS,
        }
    }

    /// Symbol selected when switching to this class.
    pub fn default_symbol(&self) -> &'static str {
        match self {
            AssetClass::Forex => "EUR/USD",
            AssetClass::Crypto => "BTC",
            AssetClass::Stocks => "AAPL",
        }
    }

    /// Whether positions are sized in pips and lots rather than by price distance.
    pub fn uses_pips(&self) -> bool {
        matches!(self, AssetClass::Forex)
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AssetClass::Forex => "Forex",
            AssetClass::Crypto => "Crypto",
            AssetClass::Stocks => "Stocks",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for AssetClass {
    type Err = RiskdeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "forex" | "fx" => Ok(AssetClass::Forex),
            "crypto" => Ok(AssetClass::Crypto),
            "stocks" | "stock" | "equity" => Ok(AssetClass::Stocks),
            _ => Err(RiskdeskError::UnknownAssetClass(s.to_string())),
        }
    }
}
