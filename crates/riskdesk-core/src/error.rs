//! Error types for riskdesk.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors from parsing user-facing domain values.
#[derive(Error, Debug)]
pub enum RiskdeskError {
    #[error("Unknown asset class: {0}")]
    UnknownAssetClass(String),
}

/// Errors raised by upstream quote providers.
///
/// These never escape the price fetcher; they are logged there and turned
/// into "no live price".
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Provider error: {0}")]
    Api(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No price returned for {0}")]
    MissingPrice(String),

    #[error("Non-positive price {price} for {symbol}")]
    NonPositivePrice { symbol: String, price: Decimal },

    #[error("Client configuration error: {0}")]
    Client(String),
}
