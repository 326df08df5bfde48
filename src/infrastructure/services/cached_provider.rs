//! Result provider reading precomputed results from the insights repository

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::analysis::InsightsSummary;
use crate::domain::charts::ChartSet;
use crate::domain::insights::{InsightsRepository, Metadata, ResultProvider};
use crate::domain::recipe::{RecipeFilter, RecipeRecord};
use crate::domain::DomainError;

const NOT_PROCESSED_HINT: &str =
    "Please wait for data processing to complete. Upload the recipe CSV to trigger processing.";

fn not_ready(what: &str) -> DomainError {
    DomainError::not_ready(format!("{} not ready. {}", what, NOT_PROCESSED_HINT))
}

/// Serves whatever the last processing run stored; never recomputes
#[derive(Debug)]
pub struct CachedResultProvider {
    repository: Arc<dyn InsightsRepository>,
}

impl CachedResultProvider {
    pub fn new(repository: Arc<dyn InsightsRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ResultProvider for CachedResultProvider {
    fn is_cached(&self) -> bool {
        true
    }

    fn operations(&self) -> &'static str {
        "Read from cache only"
    }

    async fn insights(&self) -> Result<InsightsSummary, DomainError> {
        self.repository.get_insights().await?.ok_or_else(|| {
            warn!("Insights not found in cache");
            not_ready("Insights")
        })
    }

    async fn charts(&self) -> Result<ChartSet, DomainError> {
        self.repository.get_charts().await?.ok_or_else(|| {
            warn!("Charts not found in cache");
            not_ready("Charts")
        })
    }

    async fn recipes(&self, filter: &RecipeFilter) -> Result<Vec<RecipeRecord>, DomainError> {
        if let Some(records) = self.repository.get_recipes(filter).await? {
            debug!(filter = %filter, count = records.len(), "Recipes read from cache");
            return Ok(records);
        }

        let processed = !filter.is_empty()
            && self
                .repository
                .get_recipes(&RecipeFilter::new())
                .await?
                .is_some();

        if processed {
            warn!(filter = %filter, "No cached recipes for filter");
            Err(DomainError::not_found(format!(
                "No recipes found for {}",
                filter
            )))
        } else {
            Err(not_ready("Recipes"))
        }
    }

    async fn metadata(&self) -> Result<Option<Metadata>, DomainError> {
        self.repository.get_metadata().await
    }

    async fn check_ready(&self) -> Result<(), DomainError> {
        match self.repository.get_metadata().await? {
            Some(_) => Ok(()),
            None => Err(not_ready("Data")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::insights::MockInsightsRepository;
    use crate::domain::recipe::Recipe;

    fn record(name: &str) -> RecipeRecord {
        RecipeRecord::from(&Recipe::new(name, "keto", "thai", 10.0, 2.0, 5.0))
    }

    #[tokio::test]
    async fn test_missing_insights_is_not_ready() {
        let mut repository = MockInsightsRepository::new();
        repository.expect_get_insights().returning(|| Ok(None));
        let provider = CachedResultProvider::new(Arc::new(repository));

        let err = provider.insights().await.unwrap_err();

        assert!(matches!(err, DomainError::NotReady { .. }));
        assert!(err.to_string().contains("Insights not ready"));
    }

    #[tokio::test]
    async fn test_missing_charts_is_not_ready() {
        let mut repository = MockInsightsRepository::new();
        repository.expect_get_charts().returning(|| Ok(None));
        let provider = CachedResultProvider::new(Arc::new(repository));

        assert!(matches!(
            provider.charts().await,
            Err(DomainError::NotReady { .. })
        ));
    }

    #[tokio::test]
    async fn test_recipes_hit() {
        let mut repository = MockInsightsRepository::new();
        repository
            .expect_get_recipes()
            .withf(|f| f.diet_type.as_deref() == Some("keto"))
            .returning(|_| Ok(Some(vec![record("Pad Thai")])));
        let provider = CachedResultProvider::new(Arc::new(repository));

        let records = provider
            .recipes(&RecipeFilter::new().with_diet_type("keto"))
            .await
            .unwrap();

        assert_eq!(records[0].recipe_name, "Pad Thai");
    }

    #[tokio::test]
    async fn test_unknown_filter_after_processing_is_not_found() {
        let mut repository = MockInsightsRepository::new();
        repository.expect_get_recipes().returning(|f| {
            if f.is_empty() {
                Ok(Some(vec![record("Pad Thai")]))
            } else {
                Ok(None)
            }
        });
        let provider = CachedResultProvider::new(Arc::new(repository));

        let err = provider
            .recipes(&RecipeFilter::new().with_diet_type("carnivore"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(
            err.to_string(),
            "Not found: No recipes found for diet_type=carnivore"
        );
    }

    #[tokio::test]
    async fn test_recipes_before_processing_is_not_ready() {
        let mut repository = MockInsightsRepository::new();
        repository.expect_get_recipes().returning(|_| Ok(None));
        let provider = CachedResultProvider::new(Arc::new(repository));

        let err = provider
            .recipes(&RecipeFilter::new().with_diet_type("keto"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotReady { .. }));
    }

    #[tokio::test]
    async fn test_check_ready_follows_metadata() {
        let mut repository = MockInsightsRepository::new();
        repository.expect_get_metadata().returning(|| Ok(None));
        let provider = CachedResultProvider::new(Arc::new(repository));

        assert!(provider.is_cached());
        assert!(matches!(
            provider.check_ready().await,
            Err(DomainError::NotReady { .. })
        ));
    }
}
