use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cache::memory::MemoryCache;
use crate::cache::redis::RedisCache;
use crate::cache::{AppCache, CacheError};
use crate::config::settings::{CacheBackend, CacheConfig};

/// Cheaply cloneable handle to the configured cache backend.
///
/// Values go through JSON so callers store typed data without caring
/// which backend holds the bytes.
#[derive(Clone)]
pub struct CacheManager {
    backend: Arc<dyn AppCache>,
}

impl CacheManager {
    /// Builds the backend selected by `config.backend`. Redis keys are
    /// namespaced by `cache_name`.
    pub async fn new(config: &CacheConfig, cache_name: &str) -> Result<Self, CacheError> {
        let backend: Arc<dyn AppCache> = match config.backend {
            CacheBackend::Memory => Arc::new(MemoryCache::new(&config.memory)),
            CacheBackend::Redis => Arc::new(RedisCache::new(&config.redis, cache_name).await?),
        };
        tracing::info!(backend = ?config.backend, cache_name, "Cache initialized");

        Ok(Self { backend })
    }

    pub fn from_backend(backend: Arc<dyn AppCache>) -> Self {
        Self { backend }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let Some(bytes) = self.backend.get(key).await? else {
            return Ok(None);
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| CacheError::Codec {
                key: key.to_string(),
                source,
            })
    }

    pub async fn set_json<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value).map_err(|source| CacheError::Codec {
            key: key.to_string(),
            source,
        })?;
        self.backend.set(key, bytes, ttl).await
    }

    pub async fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.backend.remove(key).await
    }
}
