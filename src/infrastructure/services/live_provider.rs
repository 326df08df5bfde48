//! Result provider that recomputes everything from the dataset source

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::processing_service::recipe_records;
use crate::domain::analysis::{build_insights, Analysis, InsightsSummary, DEFAULT_TOP_N};
use crate::domain::charts::ChartSet;
use crate::domain::ingestion::{DatasetCache, DatasetSource};
use crate::domain::insights::{Metadata, ResultProvider, StepTimes};
use crate::domain::recipe::{Dataset, RecipeFilter, RecipeRecord};
use crate::domain::DomainError;
use crate::infrastructure::charts::render_chart_set_blocking;

/// Loads the dataset through a fingerprint-keyed cache and recomputes
/// results on every call
#[derive(Debug)]
pub struct LiveResultProvider {
    source: Arc<dyn DatasetSource>,
    datasets: Arc<DatasetCache>,
    top_n: usize,
}

impl LiveResultProvider {
    pub fn new(source: Arc<dyn DatasetSource>, datasets: Arc<DatasetCache>) -> Self {
        Self {
            source,
            datasets,
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    async fn dataset(&self) -> Result<Arc<Dataset>, DomainError> {
        self.datasets.load(self.source.as_ref()).await
    }
}

fn ensure_known(kind: &str, value: Option<&str>, known: &[String]) -> Result<(), DomainError> {
    match value {
        Some(v) if !known.iter().any(|k| k == v) => Err(DomainError::not_found(format!(
            "No recipes found for {}={}",
            kind, v
        ))),
        _ => Ok(()),
    }
}

#[async_trait]
impl ResultProvider for LiveResultProvider {
    fn is_cached(&self) -> bool {
        false
    }

    fn operations(&self) -> &'static str {
        "Loaded dataset and recomputed results"
    }

    async fn insights(&self) -> Result<InsightsSummary, DomainError> {
        let dataset = self.dataset().await?;
        let analysis = Analysis::compute(&dataset, self.top_n);

        Ok(build_insights(&dataset, &analysis))
    }

    async fn charts(&self) -> Result<ChartSet, DomainError> {
        let dataset = self.dataset().await?;
        let analysis = Analysis::compute(&dataset, self.top_n);

        info!("Rendering charts on request");
        render_chart_set_blocking(analysis).await
    }

    async fn recipes(&self, filter: &RecipeFilter) -> Result<Vec<RecipeRecord>, DomainError> {
        let dataset = self.dataset().await?;

        ensure_known("diet_type", filter.diet_type.as_deref(), &dataset.diet_types())?;
        ensure_known("cuisine_type", filter.cuisine_type.as_deref(), &dataset.cuisine_types())?;

        let records = recipe_records(&dataset, filter);

        // Both values exist but never together
        if records.is_empty() && !filter.is_empty() {
            return Err(DomainError::not_found(format!(
                "No recipes found for {}",
                filter
            )));
        }

        debug!(filter = %filter, count = records.len(), "Recipes filtered from dataset");
        Ok(records)
    }

    async fn metadata(&self) -> Result<Option<Metadata>, DomainError> {
        let dataset = self.dataset().await?;

        let metadata = self.datasets.load_info().await.map(|info| Metadata {
            last_processed: info.loaded_at,
            ..Metadata::new(&dataset, info.name, info.size, StepTimes::default())
        });

        Ok(metadata)
    }

    async fn check_ready(&self) -> Result<(), DomainError> {
        self.dataset().await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::MockCache;
    use crate::domain::ingestion::{DatasetUpload, MockDatasetSource};
    use crate::infrastructure::insights::CacheInsightsRepository;
    use crate::infrastructure::services::{CachedResultProvider, ProcessingService};

    const CSV: &str = "Diet_type,Recipe_name,Cuisine_type,Protein(g),Carbs(g),Fat(g)\n\
                       paleo,Steak,american,50.123,2,20\n\
                       vegan,Tofu Bowl,asian,15,40,8\n\
                       paleo,Egg Salad,american,20,0,10\n\
                       vegan,Lentil Soup,indian,18,30,3\n";

    fn source() -> MockDatasetSource {
        let mut source = MockDatasetSource::new();
        source
            .expect_fingerprint()
            .returning(|| Ok("etag-1".to_string()));
        source
            .expect_fetch()
            .times(1)
            .returning(|| Ok(DatasetUpload::new("All_Diets.csv", CSV.as_bytes())));
        source
    }

    fn provider() -> LiveResultProvider {
        LiveResultProvider::new(Arc::new(source()), Arc::new(DatasetCache::new()))
    }

    #[tokio::test]
    async fn test_recipes_filtered_and_rounded() {
        let records = provider()
            .recipes(&RecipeFilter::new().with_diet_type("paleo"))
            .await
            .unwrap();

        let names: Vec<&str> = records.iter().map(|r| r.recipe_name.as_str()).collect();
        assert_eq!(names, vec!["Steak", "Egg Salad"]);
        assert_eq!(records[0].protein_g, 50.12);
    }

    #[tokio::test]
    async fn test_unknown_values_are_not_found() {
        let provider = provider();

        let err = provider
            .recipes(&RecipeFilter::new().with_cuisine_type("martian"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Not found: No recipes found for cuisine_type=martian");

        let err = provider
            .recipes(&RecipeFilter::new().with_diet_type("paleo").with_cuisine_type("asian"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_dataset_downloaded_once_across_calls() {
        let provider = provider();

        provider.insights().await.unwrap();
        provider.recipes(&RecipeFilter::new()).await.unwrap();
        let metadata = provider.metadata().await.unwrap().unwrap();

        assert_eq!(metadata.file_name, "All_Diets.csv");
        assert_eq!(metadata.total_recipes, 4);
        assert!(!provider.is_cached());
    }

    #[tokio::test]
    async fn test_source_failure_is_storage_unavailable() {
        let mut source = MockDatasetSource::new();
        source
            .expect_fingerprint()
            .returning(|| Err(DomainError::storage("blob unreachable")));
        let provider = LiveResultProvider::new(Arc::new(source), Arc::new(DatasetCache::new()));

        assert!(matches!(
            provider.check_ready().await,
            Err(DomainError::StorageUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_matches_cached_provider() {
        let cache = Arc::new(MockCache::new());
        let repository = Arc::new(CacheInsightsRepository::new(cache));
        ProcessingService::new(repository.clone())
            .process(DatasetUpload::new("All_Diets.csv", CSV.as_bytes()))
            .await
            .unwrap();
        let cached = CachedResultProvider::new(repository);
        let live = provider();

        for filter in [
            RecipeFilter::new(),
            RecipeFilter::new().with_diet_type("vegan"),
            RecipeFilter::new().with_cuisine_type("american"),
            RecipeFilter::new().with_diet_type("vegan").with_cuisine_type("indian"),
        ] {
            assert_eq!(
                cached.recipes(&filter).await.unwrap(),
                live.recipes(&filter).await.unwrap(),
                "mismatch for {filter}"
            );
        }

        let (cached, live) = (cached.insights().await.unwrap(), live.insights().await.unwrap());
        assert_eq!(cached.summary, live.summary);
        assert_eq!(cached.highest_protein_diet, live.highest_protein_diet);
        assert_eq!(cached.top_protein_recipes, live.top_protein_recipes);
        assert_eq!(cached.average_macronutrients, live.average_macronutrients);
    }
}
