//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, CacheSettings, CalculatorSettings, LoggingConfig, ProvidersConfig,
    TrackerSettings, MAX_DEBOUNCE_MS, MAX_REFRESH_SECS, MAX_TTL_SECS,
};

pub use config::ConfigError;

use config::{Config, Environment, File};
use std::path::Path;

/// Prefix of environment overrides, e.g. `RISKDESK_CACHE__TTL_SECS=60`.
pub const ENV_PREFIX: &str = "RISKDESK";

/// Load configuration from an optional file and the environment.
///
/// Without a file, built-in defaults apply and only the environment can
/// override them.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_with_prefix(path, ENV_PREFIX)
}

fn load_with_prefix(path: Option<&Path>, prefix: &str) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    let config = builder
        .add_source(
            Environment::with_prefix(prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app: AppConfig = config.try_deserialize()?;
    app.validate()?;
    Ok(app)
}
