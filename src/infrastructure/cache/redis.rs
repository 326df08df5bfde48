//! Redis cache implementation

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use crate::domain::cache::Cache;
use crate::domain::DomainError;

/// Configuration for Redis cache
#[derive(Debug, Clone)]
pub struct RedisCacheConfig {
    /// Redis connection URL (e.g., "redis://127.0.0.1:6379")
    pub url: String,
    /// TTL for entries written without an explicit one; `None` keeps them
    pub default_ttl: Option<Duration>,
    /// Key prefix for namespacing
    pub key_prefix: Option<String>,
}

impl Default for RedisCacheConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            default_ttl: None,
            key_prefix: None,
        }
    }
}

impl RedisCacheConfig {
    /// Creates a new configuration with the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Sets the default TTL
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = Some(ttl);
        self
    }

    /// Sets the key prefix
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }
}

/// Redis cache implementation
///
/// Connections are multiplexed through a `ConnectionManager`, which
/// reconnects on its own after a dropped connection.
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
    config: RedisCacheConfig,
}

impl fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCache")
            .field("config", &self.config)
            .field("connection", &"<ConnectionManager>")
            .finish()
    }
}

impl RedisCache {
    /// Creates a new Redis cache connection
    pub async fn new(config: RedisCacheConfig) -> Result<Self, DomainError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| DomainError::cache(format!("Failed to create Redis client: {}", e)))?;

        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| DomainError::cache(format!("Failed to connect to Redis: {}", e)))?;

        Ok(Self { connection, config })
    }

    fn prefix_key(&self, key: &str) -> String {
        match &self.config.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }

    fn strip_prefix(&self, key: String) -> String {
        match &self.config.key_prefix {
            Some(prefix) => key
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_prefix(':'))
                .map(str::to_string)
                .unwrap_or(key),
            None => key,
        }
    }

    async fn scan(&self, pattern: &str) -> Result<Vec<String>, DomainError> {
        let prefixed_pattern = self.prefix_key(pattern);
        let mut conn = self.connection.clone();

        // SCAN instead of KEYS to avoid blocking the server
        let mut cursor = 0u64;
        let mut found = Vec::new();

        loop {
            let (new_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&prefixed_pattern)
                .arg("COUNT")
                .arg(100)
                .query_async(&mut conn)
                .await
                .map_err(|e| {
                    DomainError::cache(format!(
                        "Failed to scan keys with pattern '{}': {}",
                        pattern, e
                    ))
                })?;

            found.extend(keys);
            cursor = new_cursor;

            if cursor == 0 {
                break;
            }
        }

        Ok(found)
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        let prefixed_key = self.prefix_key(key);
        let mut conn = self.connection.clone();

        let result: Option<String> = conn.get(&prefixed_key).await.map_err(|e| {
            DomainError::cache(format!("Failed to get key '{}': {}", key, e))
        })?;

        Ok(result)
    }

    async fn set_raw(
        &self,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<(), DomainError> {
        let prefixed_key = self.prefix_key(key);
        let mut conn = self.connection.clone();

        let result: redis::RedisResult<()> = match ttl.or(self.config.default_ttl) {
            Some(ttl) => {
                let ttl_secs = ttl.as_secs().max(1);
                conn.set_ex(&prefixed_key, value, ttl_secs).await
            }
            None => conn.set(&prefixed_key, value).await,
        };

        result.map_err(|e| DomainError::cache(format!("Failed to set key '{}': {}", key, e)))
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        let prefixed_key = self.prefix_key(key);
        let mut conn = self.connection.clone();

        let deleted: i32 = conn.del(&prefixed_key).await.map_err(|e| {
            DomainError::cache(format!("Failed to delete key '{}': {}", key, e))
        })?;

        Ok(deleted > 0)
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        let prefixed_key = self.prefix_key(key);
        let mut conn = self.connection.clone();

        let exists: bool = conn.exists(&prefixed_key).await.map_err(|e| {
            DomainError::cache(format!("Failed to check existence of key '{}': {}", key, e))
        })?;

        Ok(exists)
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, DomainError> {
        let mut keys: Vec<String> = self
            .scan(pattern)
            .await?
            .into_iter()
            .map(|k| self.strip_prefix(k))
            .collect();

        keys.sort();
        keys.dedup();
        Ok(keys)
    }

    async fn flush(&self) -> Result<(), DomainError> {
        let mut conn = self.connection.clone();

        // With a prefix only our own keys go; without one the whole database is flushed
        match &self.config.key_prefix {
            Some(_) => {
                let keys = self.scan("*").await?;

                if !keys.is_empty() {
                    let _: i32 = conn.del(&keys).await.map_err(|e| {
                        DomainError::cache(format!("Failed to delete keys: {}", e))
                    })?;
                }
            }
            None => {
                redis::cmd("FLUSHDB")
                    .query_async::<()>(&mut conn)
                    .await
                    .map_err(|e| DomainError::cache(format!("Failed to flush database: {}", e)))?;
            }
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        let mut conn = self.connection.clone();

        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| DomainError::cache(format!("Redis ping failed: {}", e)))
    }
}
