//! Riskdesk CLI application.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use riskdesk_config::{load_config, LoggingConfig};
use riskdesk_monitor::setup_logging;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = load_config(cli.config.as_deref());

    // Setup logging, falling back to defaults until the config error is reported
    let logging = loaded
        .as_ref()
        .map(|config| config.logging.clone())
        .unwrap_or_else(|_| LoggingConfig::default());
    let level = cli
        .log_level
        .map(|level| level.as_str().to_string())
        .unwrap_or_else(|| logging.level.clone());
    let _guard = setup_logging(
        &level,
        cli.json_logs || logging.is_json(),
        logging.file.as_deref().map(Path::new),
    );

    if let Commands::ValidateConfig = cli.command {
        return cli::commands::validate::run(cli.config.as_deref(), loaded);
    }
    let config = loaded?;

    // Execute command
    match cli.command {
        Commands::Size(args) => cli::commands::size::run(args, &config).await,
        Commands::Price(args) => cli::commands::price::run(args, &config).await,
        Commands::Watch(args) => cli::commands::watch::run(args, &config).await,
        Commands::Pip(args) => cli::commands::tools::pip(args),
        Commands::Margin(args) => cli::commands::tools::margin(args),
        Commands::Profit(args) => cli::commands::tools::profit(args),
        Commands::Compound(args) => cli::commands::tools::compound(args),
        Commands::Drawdown(args) => cli::commands::tools::drawdown(args),
        Commands::Convert(args) => cli::commands::convert::run(args, &config).await,
        Commands::Symbols(args) => cli::commands::symbols::run(args),
        Commands::ValidateConfig => Ok(()),
    }
}
