//! Dataset source backed by a CSV file on local disk

use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::domain::ingestion::{DatasetSource, DatasetUpload};
use crate::domain::DomainError;

/// Reads the dataset from a file path
///
/// The fingerprint hashes file length and modification time, so it changes
/// whenever the file is rewritten without reading the content.
#[derive(Debug, Clone)]
pub struct LocalFileSource {
    path: PathBuf,
}

impl LocalFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    fn unavailable(&self, err: std::io::Error) -> DomainError {
        DomainError::storage(format!("Cannot read '{}': {}", self.path.display(), err))
    }
}

#[async_trait]
impl DatasetSource for LocalFileSource {
    async fn fingerprint(&self) -> Result<String, DomainError> {
        let meta = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| self.unavailable(e))?;

        let modified = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_nanos())
            .unwrap_or_default();

        let mut hasher = Sha256::new();
        hasher.update(meta.len().to_be_bytes());
        hasher.update(modified.to_be_bytes());
        let fingerprint = hex::encode(hasher.finalize());

        debug!(path = %self.path.display(), fingerprint = %fingerprint, "Computed source fingerprint");
        Ok(fingerprint)
    }

    async fn fetch(&self) -> Result<DatasetUpload, DomainError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| self.unavailable(e))?;

        debug!(path = %self.path.display(), size = bytes.len(), "Read dataset file");
        Ok(DatasetUpload::new(self.file_name(), bytes))
    }
}
