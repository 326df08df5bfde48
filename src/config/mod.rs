//! Layered application configuration

mod app_config;

pub use app_config::{
    ApiConfig, ApiMode, AppConfig, CacheSettings, DataConfig, LogFormat, LoggingConfig,
    ServerConfig,
};
