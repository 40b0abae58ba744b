//! CLI definitions.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand, ValueEnum};
use riskdesk_calc::Direction;
use riskdesk_core::types::AssetClass;
use std::path::PathBuf;

/// Upper bound for `compound --periods`.
pub const MAX_COMPOUND_PERIODS: i64 = 10_000;

#[derive(Parser)]
#[command(name = "riskdesk")]
#[command(author, version, about = "Position sizing and trading calculators backed by live prices")]
pub struct Cli {
    /// Configuration file path (defaults and environment only when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level, overrides the configuration file
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate a risk-based position size
    Size(SizeArgs),
    /// Fetch live prices
    Price(PriceArgs),
    /// Recalculate a position size on every price refresh
    Watch(WatchArgs),
    /// Value of one pip
    Pip(PipArgs),
    /// Margin required to open a position
    Margin(MarginArgs),
    /// Profit or loss of a trade
    Profit(ProfitArgs),
    /// Compound a fixed gain over several periods
    Compound(CompoundArgs),
    /// Peak-to-trough drawdown
    Drawdown(DrawdownArgs),
    /// Convert between currencies at the live rate
    Convert(ConvertArgs),
    /// List built-in instruments
    Symbols(SymbolsArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args, Clone)]
pub struct SizeArgs {
    /// Asset class (forex, crypto, stocks)
    #[arg(short, long, default_value = "forex")]
    pub asset_class: AssetClass,

    /// Symbol, e.g. EUR/USD, BTC, AAPL (defaults per asset class)
    #[arg(short, long)]
    pub symbol: Option<String>,

    /// Account balance in USD
    #[arg(short, long)]
    pub balance: Option<String>,

    /// Percent of the balance to risk
    #[arg(short, long)]
    pub risk: Option<String>,

    /// Stop-loss distance in pips (forex)
    #[arg(long)]
    pub pips: Option<String>,

    /// Entry price (defaults to the live price)
    #[arg(long)]
    pub entry: Option<String>,

    /// Stop-loss price (crypto, stocks)
    #[arg(long)]
    pub stop: Option<String>,

    /// Do not fetch a live price
    #[arg(long)]
    pub offline: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args)]
pub struct PriceArgs {
    /// Asset class (forex, crypto, stocks)
    #[arg(short, long, default_value = "forex")]
    pub asset_class: AssetClass,

    /// Symbols to fetch (defaults per asset class)
    pub symbols: Vec<String>,

    /// Print quotes as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub size: SizeArgs,

    /// Refresh interval in seconds (overrides configuration)
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..=86_400))]
    pub interval: Option<u64>,
}

#[derive(clap::Args)]
pub struct PipArgs {
    /// Exchange rate of the pair
    #[arg(long)]
    pub rate: Option<String>,

    /// Trade size in units
    #[arg(long, default_value = "100000")]
    pub units: String,

    /// Pip size (derived from --symbol when omitted)
    #[arg(long)]
    pub pip_size: Option<String>,

    /// Pair used to pick the pip size
    #[arg(short, long, default_value = "EUR/USD")]
    pub symbol: String,
}

#[derive(clap::Args)]
pub struct MarginArgs {
    /// Asset price
    #[arg(long)]
    pub price: Option<String>,

    /// Trade size in units
    #[arg(long, default_value = "100000")]
    pub units: String,

    /// Leverage (100 for 1:100)
    #[arg(long, default_value = "100")]
    pub leverage: String,
}

#[derive(clap::Args)]
pub struct ProfitArgs {
    /// Open price
    #[arg(long)]
    pub open: Option<String>,

    /// Close price
    #[arg(long)]
    pub close: Option<String>,

    /// Trade size in units
    #[arg(long, default_value = "100000")]
    pub units: String,

    /// Long or short
    #[arg(short, long, default_value = "long")]
    pub direction: Direction,
}

#[derive(clap::Args)]
pub struct CompoundArgs {
    /// Starting balance
    #[arg(long)]
    pub principal: Option<String>,

    /// Gain per period in percent
    #[arg(long)]
    pub gain: Option<String>,

    /// Number of periods
    #[arg(
        long,
        default_value_t = 12,
        value_parser = clap::value_parser!(u32).range(0..=MAX_COMPOUND_PERIODS)
    )]
    pub periods: u32,
}

#[derive(clap::Args)]
pub struct DrawdownArgs {
    /// Peak equity
    #[arg(long)]
    pub peak: Option<String>,

    /// Trough equity
    #[arg(long)]
    pub trough: Option<String>,
}

#[derive(clap::Args)]
pub struct ConvertArgs {
    /// Amount to convert
    #[arg(long, default_value = "1000")]
    pub amount: String,

    /// Base currency
    #[arg(long, default_value = "USD")]
    pub from: String,

    /// Quote currency
    #[arg(long, default_value = "EUR")]
    pub to: String,
}

#[derive(clap::Args)]
pub struct SymbolsArgs {
    /// Only list this asset class
    #[arg(short, long)]
    pub asset_class: Option<AssetClass>,
}
