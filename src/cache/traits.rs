use std::time::Duration;

use async_trait::async_trait;

use crate::cache::CacheError;

/// Byte-level store shared by the cache backends.
///
/// Entries expire after `ttl`, or after the backend's configured default
/// when none is given.
#[async_trait]
pub trait AppCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<(), CacheError>;

    /// Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), CacheError>;
}
