use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::analysis::DEFAULT_TOP_N;
use crate::domain::recipe::DEFAULT_PAGE_SIZE;
use crate::domain::DomainError;
use crate::infrastructure::cache::{CacheConfig, CacheType};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub cache: CacheSettings,
    pub data: DataConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Cache backend settings as they appear in configuration files
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub cache_type: CacheType,
    pub redis_url: Option<String>,
    pub key_prefix: Option<String>,
    /// Entry lifetime; unset or 0 keeps entries until overwritten
    pub ttl_secs: Option<u64>,
    pub max_capacity: u64,
}

/// Dataset source and processing settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub csv_path: PathBuf,
    pub process_on_startup: bool,
    /// 0 disables background polling
    pub poll_interval_secs: u64,
    pub top_n: usize,
}

/// Which result provider backs the HTTP handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApiMode {
    #[default]
    Cached,
    Live,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub mode: ApiMode,
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            cache_type: CacheType::default(),
            redis_url: None,
            key_prefix: None,
            ttl_secs: None,
            max_capacity: 10_000,
        }
    }
}

impl CacheSettings {
    /// Converts to the factory configuration
    pub fn to_cache_config(&self) -> CacheConfig {
        let mut config = CacheConfig {
            cache_type: self.cache_type,
            redis_url: self.redis_url.clone(),
            ..CacheConfig::default()
        }
        .with_max_capacity(self.max_capacity);

        if let Some(prefix) = self.key_prefix.as_deref().filter(|p| !p.is_empty()) {
            config = config.with_key_prefix(prefix);
        }

        if let Some(secs) = self.ttl_secs.filter(|s| *s > 0) {
            config = config.with_default_ttl(Duration::from_secs(secs));
        }

        config
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("data/All_Diets.csv"),
            process_on_startup: true,
            poll_interval_secs: 30,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl DataConfig {
    pub fn poll_interval(&self) -> Option<Duration> {
        (self.poll_interval_secs > 0).then(|| Duration::from_secs(self.poll_interval_secs))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            mode: ApiMode::default(),
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: 100,
        }
    }
}

impl AppConfig {
    /// Layers `config/default`, `config/local` and `APP__*` variables,
    /// then validates the result
    pub fn load() -> Result<Self, DomainError> {
        let config: Self = Self::builder()
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| DomainError::configuration(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn builder() -> config::ConfigBuilder<config::builder::DefaultState> {
        config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
    }

    /// Rejects values the pipeline and pagination cannot work with
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.data.top_n == 0 {
            return Err(DomainError::configuration("data.top_n must be at least 1"));
        }

        if self.api.max_page_size == 0 {
            return Err(DomainError::configuration("api.max_page_size must be at least 1"));
        }

        if self.api.default_page_size == 0 || self.api.default_page_size > self.api.max_page_size {
            return Err(DomainError::configuration(format!(
                "api.default_page_size must be between 1 and {}",
                self.api.max_page_size
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.api.mode, ApiMode::Cached);
        assert_eq!(config.api.default_page_size, 20);
        assert_eq!(config.api.max_page_size, 100);
        assert_eq!(config.cache.cache_type, CacheType::InMemory);
        assert_eq!(config.data.top_n, 5);
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let config: AppConfig = config::Config::builder()
            .set_override("api.mode", "live")
            .unwrap()
            .set_override("logging.format", "json")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.api.mode, ApiMode::Live);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.api.max_page_size, 100);
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_top_n_is_rejected() {
        let mut config = AppConfig::default();
        config.data.top_n = 0;

        let err = config.validate().unwrap_err();

        assert!(matches!(err, DomainError::Configuration { .. }));
        assert!(err.to_string().contains("data.top_n"));
    }

    #[test]
    fn test_page_size_bounds() {
        let mut config = AppConfig::default();

        config.api.default_page_size = 0;
        assert!(config.validate().is_err());

        config.api.default_page_size = 101;
        assert!(config.validate().is_err());

        config.api.default_page_size = 100;
        assert!(config.validate().is_ok());

        config.api.max_page_size = 0;
        assert!(matches!(config.validate(), Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_cache_settings_conversion() {
        let settings = CacheSettings {
            key_prefix: Some("nutrition:".to_string()),
            ttl_secs: Some(0),
            ..CacheSettings::default()
        };

        let config = settings.to_cache_config();

        assert_eq!(config.key_prefix.as_deref(), Some("nutrition:"));
        assert_eq!(config.default_ttl, None);
        assert_eq!(config.max_capacity, 10_000);
    }

    #[test]
    fn test_zero_poll_interval_disables_polling() {
        let data = DataConfig {
            poll_interval_secs: 0,
            ..DataConfig::default()
        };

        assert!(data.poll_interval().is_none());
        assert_eq!(
            DataConfig::default().poll_interval(),
            Some(Duration::from_secs(30))
        );
    }
}
