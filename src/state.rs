//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::cache::CacheManager;
use crate::config::Settings;
use crate::db::{establish_async_connection_pool, Database};
use crate::error::AppResult;
use crate::repositories::Repositories;
use crate::services::mail::build_mailer;
use crate::services::Services;

/// Cloned per request; every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub database: Database,
    pub services: Services,
}

impl AppState {
    /// Wires the pool, verification cache, mailer, repositories and services
    /// from `settings`.
    pub async fn new(settings: Settings) -> AppResult<Self> {
        let pool = establish_async_connection_pool(&settings.database).await?;
        tracing::info!(
            max_connections = settings.database.max_connections,
            "Database connection pool initialized"
        );
        let database = Database::new(pool);

        let verification_cache = CacheManager::new(&settings.cache, "verification").await?;
        let mailer = build_mailer(&settings.mail)?;

        let repos = Repositories::new(database.clone(), verification_cache);
        let services = Services::new(repos, mailer, settings.jwt.clone(), &settings.mail);

        Ok(Self::from_parts(settings, database, services))
    }

    pub fn from_parts(settings: Settings, database: Database, services: Services) -> Self {
        Self {
            settings: Arc::new(settings),
            database,
            services,
        }
    }
}
