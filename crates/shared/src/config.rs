//! Application configuration management.

use std::path::Path;

use serde::Deserialize;

use crate::types::RoundingMode;

/// Default exchange rate feed: the ECB daily reference rates.
pub const DEFAULT_FEED_URL: &str = "https://www.ecb.europa.eu/stats/eurofxref/eurofxref-daily.xml";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Exchange rate feed configuration.
    #[serde(default)]
    pub feed: FeedConfig,
    /// Converter configuration.
    #[serde(default)]
    pub converter: ConverterConfig,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// Exchange rate feed configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// URL of the reference rate document.
    #[serde(default = "default_feed_url")]
    pub url: String,
    /// Currency the document's rates are quoted against.
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    /// Request timeout in seconds. `None` means the request never times out.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// How long a fetched snapshot is reused, in seconds. Zero disables caching.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

fn default_feed_url() -> String {
    DEFAULT_FEED_URL.to_string()
}

fn default_base_currency() -> String {
    "EUR".to_string()
}

fn default_cache_ttl() -> u64 {
    3600 // 1 hour
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            base_currency: default_base_currency(),
            timeout_secs: None,
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

/// Converter configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConverterConfig {
    /// Rounding mode applied before the final 2-decimal rounding.
    #[serde(default)]
    pub rounding: RoundingMode,
    /// Fetch rates once at construction to surface feed failures early.
    #[serde(default)]
    pub eager_init: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "exconv=info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, lowest priority first: built-in defaults, `config/default`,
    /// `config/{RUN_MODE}`, then `EXCONV_`-prefixed environment variables
    /// (`EXCONV_FEED__URL`, `EXCONV_CONVERTER__ROUNDING`, ...).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"))
    }

    /// Like [`load`](Self::load), reading config files from `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load_from(dir: &Path) -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        let file =
            |name: &str| config::File::with_name(&dir.join(name).to_string_lossy()).required(false);

        let config = config::Config::builder()
            .add_source(file("default"))
            .add_source(file(&run_mode))
            .add_source(
                config::Environment::with_prefix("EXCONV")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
