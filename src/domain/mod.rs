//! Domain layer - Core business logic and entities

pub mod analysis;
pub mod cache;
pub mod charts;
pub mod error;
pub mod ingestion;
pub mod insights;
pub mod recipe;

pub use analysis::{build_insights, Analysis, InsightsSummary};
pub use cache::{Cache, CacheExt, CacheKeys};
pub use charts::{ChartKind, ChartSet};
pub use error::DomainError;
pub use ingestion::{parse_dataset, DatasetCache, DatasetSource, DatasetUpload};
pub use insights::{DataState, InsightsRepository, Metadata, ResultProvider, StepTimes};
pub use recipe::{Dataset, Recipe, RecipeFilter, RecipeRecord};
