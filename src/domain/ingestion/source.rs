//! Dataset sources and the fingerprint-keyed dataset cache

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{info, warn};

#[cfg(test)]
use mockall::automock;

use super::loader::parse_dataset;
use crate::domain::recipe::Dataset;
use crate::domain::DomainError;

/// Raw upload handed to the ingestor
#[derive(Debug, Clone)]
pub struct DatasetUpload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl DatasetUpload {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Where recipe CSV data comes from
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DatasetSource: Send + Sync + Debug {
    /// Version tag of the current content; changes whenever the data does
    async fn fingerprint(&self) -> Result<String, DomainError>;

    /// Downloads the current content
    async fn fetch(&self) -> Result<DatasetUpload, DomainError>;
}

/// Where the cached dataset came from and when it was loaded
#[derive(Debug, Clone, PartialEq)]
pub struct LoadInfo {
    pub name: String,
    pub size: usize,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct CachedDataset {
    fingerprint: String,
    dataset: Arc<Dataset>,
    info: LoadInfo,
}

/// Single-slot cache of the last ingested dataset, keyed by source fingerprint
///
/// Passed explicitly to whoever loads data so tests can use a fresh one.
#[derive(Debug, Default)]
pub struct DatasetCache {
    slot: Mutex<Option<CachedDataset>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached dataset when the fingerprint still matches,
    /// otherwise downloads and ingests it again
    pub async fn load(&self, source: &dyn DatasetSource) -> Result<Arc<Dataset>, DomainError> {
        let fingerprint = source.fingerprint().await?;
        let mut slot = self.slot.lock().await;

        if let Some(cached) = slot.as_ref().filter(|c| c.fingerprint == fingerprint) {
            info!(fingerprint = %fingerprint, "Dataset cache hit");
            return Ok(Arc::clone(&cached.dataset));
        }

        warn!(fingerprint = %fingerprint, "Dataset cache miss - downloading");
        let upload = source.fetch().await?;
        let dataset = Arc::new(parse_dataset(&upload.bytes)?);

        *slot = Some(CachedDataset {
            fingerprint,
            dataset: Arc::clone(&dataset),
            info: LoadInfo {
                size: upload.size(),
                name: upload.name,
                loaded_at: Utc::now(),
            },
        });

        Ok(dataset)
    }

    /// Origin of the cached dataset, if any
    pub async fn load_info(&self) -> Option<LoadInfo> {
        self.slot.lock().await.as_ref().map(|c| c.info.clone())
    }

    pub async fn invalidate(&self) {
        *self.slot.lock().await = None;
    }
}
