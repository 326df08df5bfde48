//! Insights domain - processing metadata, result storage and result providers

mod metadata;
mod provider;
mod repository;

pub use metadata::{DataState, Metadata, StepTimes, PROCESSING_VERSION};
pub use provider::ResultProvider;
pub use repository::InsightsRepository;

#[cfg(test)]
pub use provider::MockResultProvider;
#[cfg(test)]
pub use repository::MockInsightsRepository;
