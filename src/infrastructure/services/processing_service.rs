//! Processing pipeline: ingest, analyse, render and cache one dataset upload

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, instrument};

use crate::domain::analysis::{build_insights, Analysis, DEFAULT_TOP_N};
use crate::domain::ingestion::{parse_dataset, DatasetSource, DatasetUpload};
use crate::domain::insights::{InsightsRepository, Metadata, StepTimes};
use crate::domain::recipe::{Dataset, RecipeFilter, RecipeRecord};
use crate::domain::DomainError;
use crate::infrastructure::charts::render_chart_set_blocking;

/// Every filter answered from cache: all recipes, each diet, each cuisine
/// and each diet/cuisine pair present in the data
pub fn recipe_filters(dataset: &Dataset) -> Vec<RecipeFilter> {
    let mut filters = vec![RecipeFilter::new()];

    filters.extend(
        dataset
            .diet_types()
            .into_iter()
            .map(|d| RecipeFilter::new().with_diet_type(d)),
    );
    filters.extend(
        dataset
            .cuisine_types()
            .into_iter()
            .map(|c| RecipeFilter::new().with_cuisine_type(c)),
    );
    filters.extend(
        dataset
            .diet_cuisine_pairs()
            .into_iter()
            .map(|(d, c)| RecipeFilter::new().with_diet_type(d).with_cuisine_type(c)),
    );

    filters
}

/// Records matching `filter`, in dataset order
pub fn recipe_records(dataset: &Dataset, filter: &RecipeFilter) -> Vec<RecipeRecord> {
    dataset
        .filter(filter)
        .into_iter()
        .map(RecipeRecord::from)
        .collect()
}

/// Runs the five processing steps for an upload and records their timings
///
/// A failing step aborts the run. Keys written by earlier steps are left
/// in place.
#[derive(Debug)]
pub struct ProcessingService {
    repository: Arc<dyn InsightsRepository>,
    top_n: usize,
}

impl ProcessingService {
    pub fn new(repository: Arc<dyn InsightsRepository>) -> Self {
        Self {
            repository,
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Fetches the current content of `source` and processes it
    pub async fn process_source(&self, source: &dyn DatasetSource) -> Result<Metadata, DomainError> {
        let upload = source.fetch().await?;
        self.process(upload).await
    }

    #[instrument(skip_all, fields(file = %upload.name, size = upload.size()))]
    pub async fn process(&self, upload: DatasetUpload) -> Result<Metadata, DomainError> {
        let result = self.run(&upload).await;

        if let Err(e) = &result {
            error!(error = %e, "Processing failed");
        }

        result
    }

    async fn run(&self, upload: &DatasetUpload) -> Result<Metadata, DomainError> {
        let started = Instant::now();
        let mut times = StepTimes::default();

        info!("Step 1: cleaning data");
        let step = Instant::now();
        let dataset = parse_dataset(&upload.bytes)?;
        let cleaned: Vec<RecipeRecord> = dataset.recipes().iter().map(RecipeRecord::from).collect();
        self.repository.store_cleaned_data(&cleaned).await?;
        times.data_cleaning_sec = step.elapsed().as_secs_f64();
        info!(rows = dataset.len(), secs = times.data_cleaning_sec, "Data cleaned and cached");

        info!("Step 2: generating charts");
        let step = Instant::now();
        let analysis = Analysis::compute(&dataset, self.top_n);
        let charts = render_chart_set_blocking(analysis.clone()).await?;
        self.repository.store_charts(&charts).await?;
        times.chart_generation_sec = step.elapsed().as_secs_f64();
        info!(secs = times.chart_generation_sec, "Charts generated and cached");

        info!("Step 3: calculating insights");
        let step = Instant::now();
        let insights = build_insights(&dataset, &analysis);
        self.repository.store_insights(&insights).await?;
        times.insights_calculation_sec = step.elapsed().as_secs_f64();
        info!(secs = times.insights_calculation_sec, "Insights calculated and cached");

        info!("Step 4: caching recipe lists");
        let step = Instant::now();
        let filters = recipe_filters(&dataset);
        for filter in &filters {
            let records = recipe_records(&dataset, filter);
            self.repository.store_recipes(filter, &records).await?;
        }
        times.recipe_caching_sec = step.elapsed().as_secs_f64();
        info!(keys = filters.len(), secs = times.recipe_caching_sec, "Recipe lists cached");

        info!("Step 5: saving metadata");
        times.total_processing_sec = started.elapsed().as_secs_f64();
        let metadata = Metadata::new(&dataset, upload.name.clone(), upload.size(), times);
        self.repository.store_metadata(&metadata).await?;

        info!(
            total_recipes = metadata.total_recipes,
            total_secs = metadata.step_times.total_processing_sec,
            "Processing complete"
        );

        Ok(metadata)
    }
}
