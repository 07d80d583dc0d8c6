//! Email verification tokens kept in the cache.

use std::time::Duration;

use crate::cache::CacheManager;
use crate::error::AppResult;

/// Lifetime of a verification token.
pub const VERIFICATION_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Clone)]
pub struct VerificationRepository {
    cache: CacheManager,
}

impl VerificationRepository {
    pub fn new(cache: CacheManager) -> Self {
        Self { cache }
    }

    pub async fn store(&self, token: &str, user_id: i32) -> AppResult<()> {
        self.cache
            .set_json(token, &user_id, Some(VERIFICATION_TTL))
            .await?;
        Ok(())
    }

    /// Resolves a token to its user id without consuming it.
    pub async fn find(&self, token: &str) -> AppResult<Option<i32>> {
        Ok(self.cache.get_json::<i32>(token).await?)
    }

    pub async fn remove(&self, token: &str) -> AppResult<()> {
        self.cache.remove(token).await?;
        Ok(())
    }
}
