//! Upstream price provider clients.
//!
//! CoinGecko serves crypto spot prices; Twelve Data serves forex pairs,
//! stocks and currency exchange rates.

mod coingecko;
mod twelve_data;

pub use coingecko::{coin_id, CoinGeckoClient, CoinGeckoConfig, COINGECKO_BASE_URL};
pub use twelve_data::{TwelveDataClient, TwelveDataConfig, DEMO_API_KEY, TWELVE_DATA_BASE_URL};
