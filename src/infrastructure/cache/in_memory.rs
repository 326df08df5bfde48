//! In-memory cache implementation using moka

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use crate::domain::cache::{glob_regex, Cache};
use crate::domain::DomainError;

/// Configuration for in-memory cache
#[derive(Debug, Clone)]
pub struct InMemoryCacheConfig {
    /// Maximum number of entries
    pub max_capacity: u64,
    /// TTL for entries written without an explicit one; `None` keeps them
    pub default_ttl: Option<Duration>,
}

impl Default for InMemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            default_ttl: None,
        }
    }
}

impl InMemoryCacheConfig {
    /// Creates a new configuration with specified max capacity
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }

    /// Sets the default TTL
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = Some(ttl);
        self
    }
}

/// Cache entry stored in moka
#[derive(Debug, Clone)]
struct CacheEntry {
    data: String,
    /// Expiration timestamp (millis since epoch)
    expires_at: Option<u64>,
}

/// Thread-safe in-memory cache implementation using moka
///
/// Used for single-process deployments and tests. Entries live until
/// overwritten unless a TTL is given per write or by configuration.
#[derive(Debug)]
pub struct InMemoryCache {
    cache: MokaCache<String, CacheEntry>,
    config: InMemoryCacheConfig,
}

impl InMemoryCache {
    /// Creates a new in-memory cache with default configuration
    pub fn new() -> Self {
        Self::with_config(InMemoryCacheConfig::default())
    }

    /// Creates a new in-memory cache with the given configuration
    pub fn with_config(config: InMemoryCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .build();

        Self { cache, config }
    }

    fn current_time_millis() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    fn is_expired(entry: &CacheEntry) -> bool {
        entry
            .expires_at
            .is_some_and(|at| Self::current_time_millis() > at)
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        match self.cache.get(key).await {
            Some(entry) => {
                if Self::is_expired(&entry) {
                    self.cache.remove(key).await;
                    return Ok(None);
                }

                Ok(Some(entry.data))
            }
            None => Ok(None),
        }
    }

    async fn set_raw(
        &self,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<(), DomainError> {
        let expires_at = ttl
            .or(self.config.default_ttl)
            .map(|ttl| Self::current_time_millis() + ttl.as_millis() as u64);

        let entry = CacheEntry {
            data: value.to_string(),
            expires_at,
        };

        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.cache.remove(key).await.is_some())
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, DomainError> {
        let regex = glob_regex(pattern)?;

        self.cache.run_pending_tasks().await;

        let cache_clone = self.cache.clone();
        let mut keys: Vec<String> = tokio::task::spawn_blocking(move || {
            cache_clone
                .iter()
                .filter(|(k, entry)| !Self::is_expired(entry) && regex.is_match(k.as_str()))
                .map(|(k, _)| k.as_str().to_string())
                .collect()
        })
        .await
        .map_err(|e| DomainError::cache(format!("Failed to iterate cache: {}", e)))?;

        keys.sort();
        Ok(keys)
    }

    async fn flush(&self) -> Result<(), DomainError> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
