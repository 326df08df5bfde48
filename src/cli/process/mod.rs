//! Process command - runs the pipeline once and exits

use std::path::PathBuf;

use tracing::{info, warn};

use crate::infrastructure::cache::CacheType;
use crate::infrastructure::source::LocalFileSource;

/// Process `file` (or the configured CSV) into the configured cache
pub async fn run(file: Option<PathBuf>) -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    if config.cache.cache_type == CacheType::InMemory {
        warn!("In-memory cache selected: results are discarded when this command exits");
    }

    let path = file.unwrap_or_else(|| config.data.csv_path.clone());
    let components = crate::create_components(&config).await?;
    let source = LocalFileSource::new(path.clone());

    info!(path = %path.display(), cache_type = %config.cache.cache_type, "Processing dataset");

    let metadata = components.processing.process_source(&source).await?;

    info!(
        total_recipes = metadata.total_recipes,
        diet_types = metadata.diet_types_count,
        cuisines = metadata.cuisines_count,
        total_secs = metadata.step_times.total_processing_sec,
        "Dataset processed"
    );

    Ok(())
}
