//! Cache trait definition

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::domain::DomainError;

/// Flat string key-value store
///
/// Values are JSON documents or base64 strings. A `None` TTL keeps the
/// entry until it is overwritten, deleted or flushed.
#[async_trait]
pub trait Cache: Send + Sync + Debug {
    /// Gets a raw value from the cache
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Sets a raw value, overwriting any previous one
    async fn set_raw(
        &self,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<(), DomainError>;

    /// Deletes a value from the cache
    async fn delete(&self, key: &str) -> Result<bool, DomainError>;

    /// Checks if a key exists in the cache
    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.get_raw(key).await?.is_some())
    }

    /// Lists keys matching a `*` glob pattern
    async fn keys(&self, pattern: &str) -> Result<Vec<String>, DomainError>;

    /// Removes every entry
    async fn flush(&self) -> Result<(), DomainError>;

    /// Verifies the store is reachable
    async fn ping(&self) -> Result<(), DomainError>;
}

/// Extension trait providing typed JSON get/set operations
pub trait CacheExt: Cache {
    /// Gets a typed value from the cache
    fn get<'a, V>(
        &'a self,
        key: &'a str,
    ) -> impl std::future::Future<Output = Result<Option<V>, DomainError>> + Send
    where
        V: DeserializeOwned + Send,
    {
        async move {
            match self.get_raw(key).await? {
                Some(data) => {
                    let value: V = serde_json::from_str(&data).map_err(|e| {
                        DomainError::internal(format!(
                            "Failed to deserialize cache value '{}': {}",
                            key, e
                        ))
                    })?;
                    Ok(Some(value))
                }
                None => Ok(None),
            }
        }
    }

    /// Sets a typed value in the cache
    fn set<'a, V>(
        &'a self,
        key: &'a str,
        value: &'a V,
        ttl: Option<Duration>,
    ) -> impl std::future::Future<Output = Result<(), DomainError>> + Send
    where
        V: Serialize + Send + Sync + ?Sized,
    {
        async move {
            let data = serde_json::to_string(value).map_err(|e| {
                DomainError::internal(format!("Failed to serialize cache value '{}': {}", key, e))
            })?;
            self.set_raw(key, &data, ttl).await
        }
    }
}

// Blanket implementation for all types implementing Cache
impl<T: Cache + ?Sized> CacheExt for T {}
