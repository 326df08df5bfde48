//! Insights repository implementations

mod cache_repository;

pub use cache_repository::CacheInsightsRepository;
