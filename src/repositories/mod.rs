//! Repository layer for data access operations.
//!
//! Every operation takes the caller's `TxContext` and resolves its
//! connection through `Database::resolve`, so the same repository call runs
//! inside an ambient transaction or on its own pooled connection.

mod catalog_repo;
mod delivery_repo;
mod order_repo;
mod session_repo;
mod user_repo;
mod verification_repo;

pub use catalog_repo::{
    CategoryRepository, ColorRepository, ItemRepository, PaymentMethodRepository, TagRepository,
};
pub use delivery_repo::DeliveryRepository;
pub use order_repo::OrderRepository;
pub use session_repo::SessionRepository;
pub use user_repo::UserRepository;
pub use verification_repo::VerificationRepository;

use diesel::result::Error as DieselError;

use crate::cache::CacheManager;
use crate::db::Database;
use crate::error::{AppError, DatabaseErrorConverter};

/// Builds a diesel error mapper tagged with `operation`.
pub(crate) fn db_error(operation: &'static str) -> impl FnOnce(DieselError) -> AppError {
    move |error| DatabaseErrorConverter::convert_diesel_error(error, operation)
}

/// Error mapper for inserts where only foreign keys on `fields` are the
/// caller's fault.
pub(crate) fn db_error_expecting(
    operation: &'static str,
    fields: &'static [&'static str],
) -> impl FnOnce(DieselError) -> AppError {
    move |error| DatabaseErrorConverter::convert_expected_foreign_keys(error, operation, fields)
}

/// Adds `run_in_transaction` to a repository holding a `db: Database` field.
macro_rules! transactional {
    ($repo:ty) => {
        impl $repo {
            /// Runs `scope` in the ambient transaction, opening one if needed.
            pub async fn run_in_transaction<T, F, Fut>(
                &self,
                ctx: &$crate::db::TxContext,
                scope: F,
            ) -> $crate::error::AppResult<T>
            where
                F: FnOnce($crate::db::TxContext) -> Fut,
                Fut: ::std::future::Future<Output = $crate::error::AppResult<T>>,
            {
                self.db.run_in_transaction(ctx, scope).await
            }
        }
    };
}

pub(crate) use transactional;

/// Aggregates all repositories for convenient access.
///
/// Cloning is cheap: the pool and cache handles are reference counted.
#[derive(Clone)]
pub struct Repositories {
    pub users: UserRepository,
    pub sessions: SessionRepository,
    pub verification: VerificationRepository,
    pub categories: CategoryRepository,
    pub colors: ColorRepository,
    pub items: ItemRepository,
    pub tags: TagRepository,
    pub payment_methods: PaymentMethodRepository,
    pub delivery: DeliveryRepository,
    pub orders: OrderRepository,
}

impl Repositories {
    pub fn new(db: Database, verification_cache: CacheManager) -> Self {
        Self {
            users: UserRepository::new(db.clone()),
            sessions: SessionRepository::new(db.clone()),
            verification: VerificationRepository::new(verification_cache),
            categories: CategoryRepository::new(db.clone()),
            colors: ColorRepository::new(db.clone()),
            items: ItemRepository::new(db.clone()),
            tags: TagRepository::new(db.clone()),
            payment_methods: PaymentMethodRepository::new(db.clone()),
            delivery: DeliveryRepository::new(db.clone()),
            orders: OrderRepository::new(db),
        }
    }
}
