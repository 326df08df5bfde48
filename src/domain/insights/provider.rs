//! Result provider trait shared by the cached and live API variants

use std::fmt::Debug;

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::Metadata;
use crate::domain::analysis::InsightsSummary;
use crate::domain::charts::ChartSet;
use crate::domain::recipe::{RecipeFilter, RecipeRecord};
use crate::domain::DomainError;

/// Source of the analysis results served over HTTP
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ResultProvider: Send + Sync + Debug {
    /// Whether results come from precomputed cache entries
    fn is_cached(&self) -> bool;

    /// Short description of the work done per request
    fn operations(&self) -> &'static str;

    async fn insights(&self) -> Result<InsightsSummary, DomainError>;

    async fn charts(&self) -> Result<ChartSet, DomainError>;

    /// Recipes matching `filter`, in dataset order
    async fn recipes(&self, filter: &RecipeFilter) -> Result<Vec<RecipeRecord>, DomainError>;

    async fn metadata(&self) -> Result<Option<Metadata>, DomainError>;

    /// Fails with `NotReady` when no results can be served yet
    async fn check_ready(&self) -> Result<(), DomainError>;
}
