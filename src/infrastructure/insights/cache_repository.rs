//! Cache-backed insights repository implementation

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::analysis::InsightsSummary;
use crate::domain::cache::{Cache, CacheExt, CacheKeys};
use crate::domain::charts::{ChartKind, ChartSet};
use crate::domain::insights::{InsightsRepository, Metadata};
use crate::domain::recipe::{RecipeFilter, RecipeRecord};
use crate::domain::DomainError;

/// Stores each result under its own flat cache key
///
/// Charts are kept as bare base64 strings; everything else is JSON.
#[derive(Debug)]
pub struct CacheInsightsRepository {
    cache: Arc<dyn Cache>,
}

impl CacheInsightsRepository {
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl InsightsRepository for CacheInsightsRepository {
    async fn store_cleaned_data(&self, records: &[RecipeRecord]) -> Result<(), DomainError> {
        self.cache.set(CacheKeys::CLEANED_DATA, records, None).await
    }

    async fn store_charts(&self, charts: &ChartSet) -> Result<(), DomainError> {
        for kind in ChartKind::ALL {
            self.cache
                .set_raw(&CacheKeys::chart(kind), charts.get(kind), None)
                .await?;
        }
        Ok(())
    }

    async fn store_insights(&self, insights: &InsightsSummary) -> Result<(), DomainError> {
        self.cache.set(CacheKeys::INSIGHTS_SUMMARY, insights, None).await
    }

    async fn store_recipes(
        &self,
        filter: &RecipeFilter,
        records: &[RecipeRecord],
    ) -> Result<(), DomainError> {
        let key = CacheKeys::recipes(filter);
        debug!(key = %key, count = records.len(), "Storing recipe list");

        self.cache.set(&key, records, None).await
    }

    async fn store_metadata(&self, metadata: &Metadata) -> Result<(), DomainError> {
        self.cache.set(CacheKeys::METADATA, metadata, None).await
    }

    async fn get_recipes(
        &self,
        filter: &RecipeFilter,
    ) -> Result<Option<Vec<RecipeRecord>>, DomainError> {
        self.cache.get(&CacheKeys::recipes(filter)).await
    }

    async fn get_insights(&self) -> Result<Option<InsightsSummary>, DomainError> {
        self.cache.get(CacheKeys::INSIGHTS_SUMMARY).await
    }

    async fn get_charts(&self) -> Result<Option<ChartSet>, DomainError> {
        let bar_chart = self.cache.get_raw(&CacheKeys::chart(ChartKind::BarChart)).await?;
        let heatmap = self.cache.get_raw(&CacheKeys::chart(ChartKind::Heatmap)).await?;
        let scatter_plot = self
            .cache
            .get_raw(&CacheKeys::chart(ChartKind::ScatterPlot))
            .await?;

        match (bar_chart, heatmap, scatter_plot) {
            (Some(bar_chart), Some(heatmap), Some(scatter_plot)) => Ok(Some(ChartSet {
                bar_chart,
                heatmap,
                scatter_plot,
            })),
            _ => Ok(None),
        }
    }

    async fn get_metadata(&self) -> Result<Option<Metadata>, DomainError> {
        self.cache.get(CacheKeys::METADATA).await
    }

    async fn cached_keys(&self) -> Result<Vec<String>, DomainError> {
        self.cache.keys("*").await
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.cache.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::MockCache;
    use crate::domain::recipe::Recipe;
    use crate::infrastructure::cache::InMemoryCache;

    fn records() -> Vec<RecipeRecord> {
        vec![
            RecipeRecord::from(&Recipe::new("Chicken Soup", "paleo", "american", 20.0, 5.0, 4.0)),
            RecipeRecord::from(&Recipe::new("Veg Curry", "vegan", "indian", 9.5, 40.0, 12.0)),
        ]
    }

    fn charts() -> ChartSet {
        ChartSet {
            bar_chart: "QkFS".to_string(),
            heatmap: "SEVBVA==".to_string(),
            scatter_plot: "U0NBVA==".to_string(),
        }
    }

    #[tokio::test]
    async fn test_recipes_roundtrip_identical_json() {
        let cache = Arc::new(InMemoryCache::new());
        let repo = CacheInsightsRepository::new(cache.clone());
        let filter = RecipeFilter::new();

        repo.store_recipes(&filter, &records()).await.unwrap();

        let stored = cache.get_raw("recipes:all").await.unwrap().unwrap();
        assert_eq!(stored, serde_json::to_string(&records()).unwrap());
        assert_eq!(repo.get_recipes(&filter).await.unwrap(), Some(records()));
    }

    #[tokio::test]
    async fn test_filtered_recipes_use_their_own_key() {
        let cache = Arc::new(MockCache::new());
        let repo = CacheInsightsRepository::new(cache.clone());
        let filter = RecipeFilter::new()
            .with_diet_type("vegan")
            .with_cuisine_type("indian");

        repo.store_recipes(&filter, &records()[1..]).await.unwrap();

        assert!(cache.snapshot().contains_key("recipes:diet:vegan:cuisine:indian"));
        assert!(repo.get_recipes(&RecipeFilter::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_charts_stored_as_bare_base64() {
        let cache = Arc::new(MockCache::new());
        let repo = CacheInsightsRepository::new(cache.clone());

        repo.store_charts(&charts()).await.unwrap();

        let snapshot = cache.snapshot();
        assert_eq!(snapshot["charts:bar_chart"], "QkFS");
        assert_eq!(snapshot["charts:heatmap"], "SEVBVA==");
        assert_eq!(repo.get_charts().await.unwrap(), Some(charts()));
    }

    #[tokio::test]
    async fn test_partial_charts_read_as_missing() {
        let cache = Arc::new(
            MockCache::new()
                .with_raw_entry("charts:bar_chart", "QkFS")
                .with_raw_entry("charts:heatmap", "SEVBVA=="),
        );
        let repo = CacheInsightsRepository::new(cache);

        assert!(repo.get_charts().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cached_keys_and_ping() {
        let cache = Arc::new(MockCache::new().with_raw_entry("metadata", "{}"));
        let repo = CacheInsightsRepository::new(cache);

        assert_eq!(repo.cached_keys().await.unwrap(), vec!["metadata"]);
        assert!(repo.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_cache_failure_propagates() {
        let repo = CacheInsightsRepository::new(Arc::new(MockCache::new().with_error("down")));

        let err = repo.get_insights().await.unwrap_err();
        assert!(matches!(err, DomainError::CacheUnavailable { .. }));
    }
}
