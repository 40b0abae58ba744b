//! Configuration structures.

use config::ConfigError;
use riskdesk_calc::DegenerateStopPolicy;
use riskdesk_feeds::{COINGECKO_BASE_URL, TWELVE_DATA_BASE_URL};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest accepted cache TTL.
pub const MAX_TTL_SECS: u64 = 86_400;

/// Longest accepted refresh interval.
pub const MAX_REFRESH_SECS: u64 = 86_400;

/// Longest accepted debounce window.
pub const MAX_DEBOUNCE_MS: u64 = 60_000;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub tracker: TrackerSettings,
    #[serde(default)]
    pub calculator: CalculatorSettings,
}

impl AppConfig {
    /// Reject values that would make the price service misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache.ttl_secs == 0 || self.cache.ttl_secs > MAX_TTL_SECS {
            return Err(ConfigError::Message(format!(
                "cache.ttl_secs must be between 1 and {}",
                MAX_TTL_SECS
            )));
        }
        if self.tracker.refresh_secs == 0 || self.tracker.refresh_secs > MAX_REFRESH_SECS {
            return Err(ConfigError::Message(format!(
                "tracker.refresh_secs must be between 1 and {}",
                MAX_REFRESH_SECS
            )));
        }
        if self.tracker.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(ConfigError::Message(format!(
                "tracker.debounce_ms must be at most {}",
                MAX_DEBOUNCE_MS
            )));
        }
        if self.providers.coingecko_base_url.trim().is_empty()
            || self.providers.twelve_data_base_url.trim().is_empty()
        {
            return Err(ConfigError::Message("provider base URLs must be set".into()));
        }
        match self.logging.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(ConfigError::Message(format!(
                "logging.format must be \"pretty\" or \"json\", got {:?}",
                other
            ))),
        }
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "riskdesk".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Upstream quote providers. Keys are read from the named environment
/// variables, never stored in the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub coingecko_base_url: String,
    pub coingecko_api_key_env: String,
    pub twelve_data_base_url: String,
    pub twelve_data_api_key_env: String,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            coingecko_base_url: COINGECKO_BASE_URL.to_string(),
            coingecko_api_key_env: "COINGECKO_API_KEY".to_string(),
            twelve_data_base_url: TWELVE_DATA_BASE_URL.to_string(),
            twelve_data_api_key_env: "TWELVE_DATA_API_KEY".to_string(),
        }
    }
}

/// Quote cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub ttl_secs: u64,
}

impl CacheSettings {
    /// TTL as a duration, clamped to [`MAX_TTL_SECS`].
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.ttl_secs.min(MAX_TTL_SECS) as i64)
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { ttl_secs: 30 }
    }
}

/// Live price tracking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    /// Quiet period after a selection change before fetching
    pub debounce_ms: u64,
    /// Interval between refreshes in `watch`
    pub refresh_secs: u64,
}

impl TrackerSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            refresh_secs: 30,
        }
    }
}

/// Position calculator settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CalculatorSettings {
    pub degenerate_stop: DegenerateStopPolicy,
}
