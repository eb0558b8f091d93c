//! Application configuration management.

use serde::Deserialize;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Client-side cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Default time-to-live for cache entries, in seconds.
    #[serde(default = "default_ttl_secs")]
    pub default_ttl_secs: u64,
    /// Time-to-live for financial data, in seconds.
    ///
    /// Shorter than the default because financial data churns faster
    /// and stale reads are more costly there.
    #[serde(default = "default_financial_ttl_secs")]
    pub financial_ttl_secs: u64,
}

fn default_ttl_secs() -> u64 {
    300 // 5 minutes
}

fn default_financial_ttl_secs() -> u64 {
    120 // 2 minutes
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_secs: default_ttl_secs(),
            financial_ttl_secs: default_financial_ttl_secs(),
        }
    }
}

impl CacheConfig {
    /// Returns the default TTL as a [`Duration`].
    #[must_use]
    pub const fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }

    /// Returns the financial-data TTL as a [`Duration`].
    #[must_use]
    pub const fn financial_ttl(&self) -> Duration {
        Duration::from_secs(self.financial_ttl_secs)
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("AMANA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_defaults() {
        let config = CacheConfig::default();
        assert_eq!(config.default_ttl(), Duration::from_secs(300));
        assert_eq!(config.financial_ttl(), Duration::from_secs(120));
    }

    #[test]
    fn test_financial_ttl_shorter_than_default() {
        let config = CacheConfig::default();
        assert!(config.financial_ttl() < config.default_ttl());
    }

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.cache.default_ttl_secs, 300);
    }
}
