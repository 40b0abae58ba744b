//! Validate configuration command.

use anyhow::Result;
use riskdesk_config::{AppConfig, ConfigError};
use std::path::Path;

pub fn run(config_path: Option<&Path>, loaded: Result<AppConfig, ConfigError>) -> Result<()> {
    match config_path {
        Some(path) => println!("Validating configuration: {:?}", path),
        None => println!("Validating built-in defaults and environment overrides"),
    }

    match loaded {
        Ok(config) => {
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {}", config.logging.level);
            println!("Log format: {}", config.logging.format);
            println!("CoinGecko: {}", config.providers.coingecko_base_url);
            println!("Twelve Data: {}", config.providers.twelve_data_base_url);
            println!("Cache TTL: {}s", config.cache.ttl_secs);
            println!("Debounce: {}ms", config.tracker.debounce_ms);
            println!("Refresh: {}s", config.tracker.refresh_secs);
            println!("Degenerate stop: {:?}", config.calculator.degenerate_stop);
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
