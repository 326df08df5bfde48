//! Infrastructure services

mod cached_provider;
mod live_provider;
mod processing_service;
mod source_poller;

pub use cached_provider::CachedResultProvider;
pub use live_provider::LiveResultProvider;
pub use processing_service::{recipe_filters, recipe_records, ProcessingService};
pub use source_poller::SourcePoller;
