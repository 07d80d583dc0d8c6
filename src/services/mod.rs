//! Service layer for business logic operations.
//!
//! Services take the caller's `TxContext` and pass it down, so a service
//! call made inside another service's transaction joins it.

mod catalog_service;
mod delivery_service;
pub mod mail;
mod order_service;
mod user_service;

pub use catalog_service::CatalogService;
pub use delivery_service::{normalize_company_name, DeliveryService};
pub use order_service::{validate_order, OrderService};
pub use user_service::{Registration, UserService};

use std::sync::Arc;

use crate::config::{JwtConfig, MailConfig};
use crate::repositories::Repositories;
use crate::services::mail::Mailer;

/// Aggregates all services for convenient access.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub catalog: CatalogService,
    pub delivery: DeliveryService,
    pub orders: OrderService,
}

impl Services {
    pub fn new(repos: Repositories, mailer: Arc<dyn Mailer>, jwt: JwtConfig, mail: &MailConfig) -> Self {
        let delivery = DeliveryService::new(repos.delivery);
        Self {
            users: UserService::new(repos.users, repos.sessions, repos.verification, mailer, jwt, mail),
            catalog: CatalogService::new(
                repos.categories,
                repos.colors,
                repos.items,
                repos.tags,
                repos.payment_methods,
            ),
            orders: OrderService::new(repos.orders, delivery.clone()),
            delivery,
        }
    }
}
