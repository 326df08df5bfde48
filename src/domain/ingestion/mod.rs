//! Recipe ingestion
//!
//! This module provides:
//! - `parse_dataset` for turning CSV bytes into a cleaned `Dataset`
//! - `DatasetSource` trait for wherever the CSV lives
//! - `DatasetCache` keyed by source fingerprint

pub mod loader;
pub mod source;

pub use loader::{parse_dataset, REQUIRED_COLUMNS};
pub use source::{DatasetCache, DatasetSource, DatasetUpload, LoadInfo};

#[cfg(test)]
pub use source::MockDatasetSource;
