//! Shared fixtures for the database-backed integration tests.
//!
//! The tests need a disposable PostgreSQL database. Point
//! `STOREFRONT_TEST_DATABASE_URL` at one; when it is unset every test returns
//! early without touching storage.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use storefront::cache::{CacheManager, MemoryCache};
use storefront::config::settings::MemoryCacheConfig;
use storefront::config::{DatabaseConfig, JwtConfig, MailConfig};
use storefront::db::{Database, TxContext, establish_async_connection_pool, run_pending_migrations};
use storefront::error::AppResult;
use storefront::models::{DeliveryInput, ItemColor, NewCategory, NewColor, NewItem};
use storefront::repositories::Repositories;
use storefront::services::mail::{MailMessage, Mailer};
use storefront::services::{Registration, Services};
use tokio::sync::OnceCell;
use uuid::Uuid;

pub const DATABASE_URL_ENV: &str = "STOREFRONT_TEST_DATABASE_URL";

static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// Mailer that keeps every message for inspection.
#[derive(Default)]
pub struct CapturingMailer {
    sent: Mutex<Vec<MailMessage>>,
}

impl CapturingMailer {
    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for CapturingMailer {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "capture"
    }
}

pub struct TestApp {
    pub database: Database,
    pub repos: Repositories,
    pub services: Services,
    pub mailer: Arc<CapturingMailer>,
    pub jwt: JwtConfig,
}

/// Builds a fresh stack against the test database, or `None` when no
/// database is configured.
pub async fn setup() -> Option<TestApp> {
    let url = std::env::var(DATABASE_URL_ENV).ok()?;

    MIGRATED
        .get_or_init(|| async {
            run_pending_migrations(&url)
                .await
                .expect("migrations should apply to the test database");
        })
        .await;

    let config = DatabaseConfig {
        url,
        max_connections: 5,
        min_connections: 1,
        ..Default::default()
    };
    let pool = establish_async_connection_pool(&config)
        .await
        .expect("test database should be reachable");
    let database = Database::new(pool);

    let cache = CacheManager::from_backend(Arc::new(MemoryCache::new(&MemoryCacheConfig::default())));
    let repos = Repositories::new(database.clone(), cache);

    let jwt = JwtConfig {
        secret: "integration-test-secret-0123456789abcdef".to_string(),
        ..Default::default()
    };
    let mailer = Arc::new(CapturingMailer::default());
    let services = Services::new(repos.clone(), mailer.clone(), jwt.clone(), &MailConfig::default());

    Some(TestApp {
        database,
        repos,
        services,
        mailer,
        jwt,
    })
}

/// A short suffix that keeps names unique across parallel tests.
pub fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, &Uuid::new_v4().simple().to_string()[..12])
}

/// Ids of one sellable item in one color plus a delivery option.
pub struct Seed {
    pub item_id: i32,
    pub color_id: i32,
    pub delivery_id: i32,
}

impl TestApp {
    pub async fn register_user(&self) -> i32 {
        let login = unique("user");
        self.services
            .users
            .register(
                &TxContext::new(),
                Registration {
                    email: format!("{}@example.com", login),
                    login,
                    password: "correct horse battery".to_string(),
                },
            )
            .await
            .expect("registration should succeed")
    }

    /// Creates another color and offers `item_id` in it.
    pub async fn add_color(&self, item_id: i32) -> i32 {
        let ctx = TxContext::new();
        let catalog = &self.services.catalog;
        let color_id = catalog
            .create_color(
                &ctx,
                NewColor {
                    name: unique("color"),
                    hex: "#00aaff".to_string(),
                    price: BigDecimal::from(2),
                },
            )
            .await
            .expect("color");
        catalog
            .add_item_color(&ctx, ItemColor { item_id, color_id })
            .await
            .expect("item color");
        color_id
    }

    pub async fn seed_catalog(&self) -> Seed {
        let ctx = TxContext::new();
        let catalog = &self.services.catalog;

        let category_id = catalog
            .create_category(&ctx, NewCategory { name: unique("category") })
            .await
            .expect("category");
        let color_id = catalog
            .create_color(
                &ctx,
                NewColor {
                    name: unique("color"),
                    hex: "#aa00ff".to_string(),
                    price: BigDecimal::from(1),
                },
            )
            .await
            .expect("color");
        let item_id = catalog
            .create_item(
                &ctx,
                NewItem {
                    name: unique("item"),
                    description: "integration item".to_string(),
                    category_id,
                    sku: unique("sku"),
                    price: BigDecimal::from(20),
                },
            )
            .await
            .expect("item");
        catalog
            .add_item_color(&ctx, ItemColor { item_id, color_id })
            .await
            .expect("item color");

        let delivery_id = self
            .services
            .delivery
            .create(
                &ctx,
                DeliveryInput {
                    name: unique("express"),
                    company_name: unique("carrier"),
                    price: BigDecimal::from(5),
                },
            )
            .await
            .expect("delivery");

        Seed {
            item_id,
            color_id,
            delivery_id,
        }
    }
}
