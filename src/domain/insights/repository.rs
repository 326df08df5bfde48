//! Insights repository trait

use std::fmt::Debug;

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::Metadata;
use crate::domain::analysis::InsightsSummary;
use crate::domain::charts::ChartSet;
use crate::domain::recipe::{RecipeFilter, RecipeRecord};
use crate::domain::DomainError;

/// Typed access to the precomputed results of a processing run
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InsightsRepository: Send + Sync + Debug {
    /// Store the full cleaned dataset
    async fn store_cleaned_data(&self, records: &[RecipeRecord]) -> Result<(), DomainError>;

    /// Store all three rendered charts
    async fn store_charts(&self, charts: &ChartSet) -> Result<(), DomainError>;

    async fn store_insights(&self, insights: &InsightsSummary) -> Result<(), DomainError>;

    /// Store the recipe list answering `filter`
    async fn store_recipes(
        &self,
        filter: &RecipeFilter,
        records: &[RecipeRecord],
    ) -> Result<(), DomainError>;

    async fn store_metadata(&self, metadata: &Metadata) -> Result<(), DomainError>;

    /// Get the recipe list stored for `filter`
    async fn get_recipes(
        &self,
        filter: &RecipeFilter,
    ) -> Result<Option<Vec<RecipeRecord>>, DomainError>;

    async fn get_insights(&self) -> Result<Option<InsightsSummary>, DomainError>;

    /// Get the charts; `None` unless all three are present
    async fn get_charts(&self) -> Result<Option<ChartSet>, DomainError>;

    async fn get_metadata(&self) -> Result<Option<Metadata>, DomainError>;

    /// Every key currently held by the backing store
    async fn cached_keys(&self) -> Result<Vec<String>, DomainError>;

    /// Verify the backing store is reachable
    async fn ping(&self) -> Result<(), DomainError>;
}
