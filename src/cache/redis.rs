use std::time::Duration;

use async_trait::async_trait;
use bb8::{Pool, PooledConnection};
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};

use crate::cache::{AppCache, CacheError};
use crate::config::settings::RedisCacheConfig;

type RedisPool = Pool<Client>;

/// Redis-backed cache; every key is namespaced as `{prefix}:{cache_name}:{key}`.
pub struct RedisCache {
    pool: RedisPool,
    key_prefix: String,
    default_ttl: Duration,
}

impl RedisCache {
    pub async fn new(config: &RedisCacheConfig, cache_name: &str) -> Result<Self, CacheError> {
        let client =
            Client::open(config.url.as_str()).map_err(|e| CacheError::Connection(e.to_string()))?;

        let pool = Pool::builder()
            .max_size(config.pool_size)
            .connection_timeout(Duration::from_secs(config.connection_timeout))
            .build(client)
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        Ok(Self {
            pool,
            key_prefix: format!("{}:{}", config.key_prefix, cache_name),
            default_ttl: Duration::from_secs(config.ttl_seconds),
        })
    }

    fn prefixed_key(&self, key: &str) -> String {
        format!("{}:{}", self.key_prefix, key)
    }

    async fn conn(&self) -> Result<PooledConnection<'_, Client>, CacheError> {
        self.pool
            .get()
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))
    }
}

fn command_error(e: redis::RedisError) -> CacheError {
    CacheError::Command(e.to_string())
}

#[async_trait]
impl AppCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut conn = self.conn().await?;
        let conn: &mut MultiplexedConnection = &mut conn;
        conn.get(self.prefixed_key(key)).await.map_err(command_error)
    }

    async fn set(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        // SETEX rejects a zero expiry
        let seconds = ttl.unwrap_or(self.default_ttl).as_secs().max(1);
        let mut conn = self.conn().await?;
        let conn: &mut MultiplexedConnection = &mut conn;
        conn.set_ex::<_, _, ()>(self.prefixed_key(key), value, seconds)
            .await
            .map_err(command_error)
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.conn().await?;
        let conn: &mut MultiplexedConnection = &mut conn;
        conn.del::<_, ()>(self.prefixed_key(key)).await.map_err(command_error)
    }
}
