//! Nutrition Insights API
//!
//! Computes descriptive statistics over a recipe dataset:
//! - CSV ingestion with mean fill of missing numeric values
//! - Per-diet aggregates, top recipes, ratios and cuisine modes
//! - Bar chart, heatmap and scatter plot rendered to PNG
//! - Results stored in a key-value cache (in-memory or Redis) and served
//!   over HTTP with filtering, keyword search and pagination

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use config::ApiMode;
use domain::ingestion::{DatasetCache, DatasetSource};
use domain::insights::{InsightsRepository, ResultProvider};
use infrastructure::{
    cache::CacheFactory,
    insights::CacheInsightsRepository,
    services::{CachedResultProvider, LiveResultProvider, ProcessingService},
    source::LocalFileSource,
};
use tracing::info;

/// Everything the CLI commands wire together
#[derive(Debug, Clone)]
pub struct Components {
    pub state: AppState,
    pub processing: Arc<ProcessingService>,
    pub source: Arc<dyn DatasetSource>,
}

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    Ok(create_components(config).await?.state)
}

/// Builds the cache, repository, processing service and the result
/// provider selected by `api.mode`
pub async fn create_components(config: &AppConfig) -> anyhow::Result<Components> {
    let cache = CacheFactory::create(&config.cache.to_cache_config()).await?;
    let repository: Arc<dyn InsightsRepository> = Arc::new(CacheInsightsRepository::new(cache));

    let source: Arc<dyn DatasetSource> = Arc::new(LocalFileSource::new(config.data.csv_path.clone()));
    let processing =
        Arc::new(ProcessingService::new(repository.clone()).with_top_n(config.data.top_n));

    let provider: Arc<dyn ResultProvider> = match config.api.mode {
        ApiMode::Cached => Arc::new(CachedResultProvider::new(repository.clone())),
        ApiMode::Live => Arc::new(
            LiveResultProvider::new(source.clone(), Arc::new(DatasetCache::new()))
                .with_top_n(config.data.top_n),
        ),
    };

    info!(
        mode = ?config.api.mode,
        cache_type = %config.cache.cache_type,
        csv_path = %config.data.csv_path.display(),
        "Components initialized"
    );

    Ok(Components {
        state: AppState::new(provider, repository, config.api.clone()),
        processing,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_components_follow_api_mode() {
        let mut config = AppConfig::default();

        let state = create_app_state_with_config(&config).await.unwrap();
        assert!(state.provider.is_cached());

        config.api.mode = ApiMode::Live;
        let state = create_app_state_with_config(&config).await.unwrap();
        assert!(!state.provider.is_cached());
    }

    #[tokio::test]
    async fn test_default_state_is_unprocessed() {
        let state = create_app_state().await.unwrap();

        assert!(state.repository.ping().await.is_ok());
        assert!(state.provider.metadata().await.unwrap().is_none());
    }
}
