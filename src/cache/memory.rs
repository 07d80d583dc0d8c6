use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use cached::{Cached, SizedCache};

use crate::cache::{AppCache, CacheError};
use crate::config::settings::MemoryCacheConfig;

struct Entry {
    expires_at: Instant,
    value: Vec<u8>,
}

/// Bounded in-memory cache; each entry carries its own expiry.
///
/// Expired entries are dropped lazily when read.
pub struct MemoryCache {
    store: Mutex<SizedCache<String, Entry>>,
    default_ttl: Duration,
}

impl MemoryCache {
    pub fn new(config: &MemoryCacheConfig) -> Self {
        Self {
            store: Mutex::new(SizedCache::with_size(config.max_size)),
            default_ttl: Duration::from_secs(config.ttl_seconds),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, SizedCache<String, Entry>>, CacheError> {
        self.store
            .lock()
            .map_err(|e| CacheError::Command(e.to_string()))
    }
}

#[async_trait]
impl AppCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut store = self.lock()?;
        let expired = match store.cache_get(key) {
            Some(entry) if entry.expires_at > Instant::now() => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };
        if expired {
            store.cache_remove(key);
        }
        Ok(None)
    }

    async fn set(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let mut store = self.lock()?;
        store.cache_set(
            key.to_string(),
            Entry {
                expires_at: Instant::now() + ttl,
                value,
            },
        );
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.lock()?.cache_remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(max_size: usize) -> MemoryCache {
        MemoryCache::new(&MemoryCacheConfig {
            max_size,
            ttl_seconds: 3600,
        })
    }

    #[tokio::test]
    async fn stores_and_removes_values() {
        let cache = cache(10);
        cache.set("token", b"42".to_vec(), None).await.unwrap();
        assert_eq!(cache.get("token").await.unwrap(), Some(b"42".to_vec()));

        cache.remove("token").await.unwrap();
        assert_eq!(cache.get("token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn zero_ttl_entries_expire_immediately() {
        let cache = cache(10);
        cache.set("short", b"1".to_vec(), Some(Duration::ZERO)).await.unwrap();
        cache.set("long", b"2".to_vec(), None).await.unwrap();

        assert_eq!(cache.get("short").await.unwrap(), None);
        assert_eq!(cache.get("long").await.unwrap(), Some(b"2".to_vec()));
    }

    #[tokio::test]
    async fn evicts_least_recently_used_beyond_capacity() {
        let cache = cache(2);
        cache.set("a", vec![1], None).await.unwrap();
        cache.set("b", vec![2], None).await.unwrap();
        cache.set("c", vec![3], None).await.unwrap();

        assert_eq!(cache.get("a").await.unwrap(), None);
        assert_eq!(cache.get("c").await.unwrap(), Some(vec![3]));
    }

    #[tokio::test]
    async fn overwrite_resets_expiry() {
        let cache = cache(10);
        cache.set("token", vec![1], Some(Duration::ZERO)).await.unwrap();
        cache.set("token", vec![2], Some(Duration::from_secs(60))).await.unwrap();
        assert_eq!(cache.get("token").await.unwrap(), Some(vec![2]));
    }
}
