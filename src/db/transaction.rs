//! Ambient transaction propagation.
//!
//! A `TxContext` travels through service and repository calls. When it
//! carries a transaction, every repository call made with it runs on the same
//! connection; otherwise each call checks out its own pooled connection.
//!
//! Nested `run_in_transaction` calls join the outer transaction, so only the
//! outermost scope commits or rolls back.

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use diesel_async::{AnsiTransactionManager, AsyncPgConnection, TransactionManager};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::db::{AsyncDbPool, PooledConn};
use crate::error::{AppError, AppResult};

/// Connection holding an open transaction, shared by every call in its scope.
pub type SharedTx = Arc<Mutex<PooledConn>>;

type Tm = AnsiTransactionManager;

/// Request-scoped carrier of the ambient transaction.
#[derive(Clone, Default)]
pub struct TxContext {
    tx: Option<SharedTx>,
}

impl TxContext {
    /// A context with no transaction attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives a child context carrying `tx`. The receiver is left untouched.
    pub fn inject(&self, tx: SharedTx) -> Self {
        Self { tx: Some(tx) }
    }

    pub fn extract(&self) -> Option<&SharedTx> {
        self.tx.as_ref()
    }

    pub fn in_transaction(&self) -> bool {
        self.tx.is_some()
    }
}

impl fmt::Debug for TxContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TxContext")
            .field("in_transaction", &self.in_transaction())
            .finish()
    }
}

/// Every request starts without a transaction.
impl<S> FromRequestParts<S> for TxContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(TxContext::new())
    }
}

/// Connection handed to repositories.
///
/// Holding a `Shared` connection locks the ambient transaction, so a
/// repository must release it before calling another repository.
pub enum DbConn {
    Pooled(PooledConn),
    Shared(OwnedMutexGuard<PooledConn>),
}

impl Deref for DbConn {
    type Target = AsyncPgConnection;

    fn deref(&self) -> &AsyncPgConnection {
        match self {
            DbConn::Pooled(conn) => &**conn,
            DbConn::Shared(guard) => &***guard,
        }
    }
}

impl DerefMut for DbConn {
    fn deref_mut(&mut self) -> &mut AsyncPgConnection {
        match self {
            DbConn::Pooled(conn) => &mut **conn,
            DbConn::Shared(guard) => &mut ***guard,
        }
    }
}

/// Pool handle that resolves connections for a `TxContext`.
#[derive(Clone)]
pub struct Database {
    pool: AsyncDbPool,
}

impl Database {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &AsyncDbPool {
        &self.pool
    }

    /// Returns the ambient transaction's connection, or a fresh pooled one.
    pub async fn resolve(&self, ctx: &TxContext) -> AppResult<DbConn> {
        match ctx.extract() {
            Some(tx) => Ok(DbConn::Shared(tx.clone().lock_owned().await)),
            None => Ok(DbConn::Pooled(self.pool.get_owned().await?)),
        }
    }

    /// Runs `scope` inside a transaction.
    ///
    /// If `ctx` already carries a transaction the scope joins it and nothing
    /// is committed here. Otherwise a transaction is opened on a dedicated
    /// connection, committed when the scope returns `Ok` and rolled back when
    /// it returns `Err`. A rollback failure is logged and the scope's error is
    /// returned unchanged.
    ///
    /// If the returned future is dropped before completion the connection is
    /// dropped mid-transaction and the pool discards it, which aborts the
    /// transaction server side.
    pub async fn run_in_transaction<T, F, Fut>(&self, ctx: &TxContext, scope: F) -> AppResult<T>
    where
        F: FnOnce(TxContext) -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        if ctx.in_transaction() {
            return scope(ctx.clone()).await;
        }

        let mut conn = self.pool.get_owned().await?;
        <Tm as TransactionManager<AsyncPgConnection>>::begin_transaction(&mut *conn)
            .await
            .map_err(|e| AppError::TransactionBegin {
                source: anyhow::Error::from(e),
            })?;
        tracing::trace!("Transaction started");

        let tx: SharedTx = Arc::new(Mutex::new(conn));
        let result = scope(ctx.inject(tx.clone())).await;

        let mut conn = tx.lock().await;
        match result {
            Ok(value) => {
                <Tm as TransactionManager<AsyncPgConnection>>::commit_transaction(&mut **conn)
                    .await
                    .map_err(|e| AppError::TransactionCommit {
                        source: anyhow::Error::from(e),
                    })?;
                tracing::trace!("Transaction committed");
                Ok(value)
            }
            Err(err) => {
                match <Tm as TransactionManager<AsyncPgConnection>>::rollback_transaction(
                    &mut **conn,
                )
                .await
                {
                    Ok(()) => tracing::debug!(error = %err, "Transaction rolled back"),
                    Err(rollback_err) => tracing::error!(
                        error = %err,
                        rollback_error = %rollback_err,
                        "Failed to roll back transaction"
                    ),
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[test]
    fn new_context_has_no_transaction() {
        let ctx = TxContext::new();
        assert!(!ctx.in_transaction());
        assert!(ctx.extract().is_none());
        assert_eq!(format!("{:?}", ctx), "TxContext { in_transaction: false }");
    }

    #[tokio::test]
    async fn extractor_yields_empty_context() {
        let (mut parts, _) = Request::builder()
            .uri("/api/v1/orders")
            .body(())
            .unwrap()
            .into_parts();
        let ctx = TxContext::from_request_parts(&mut parts, &()).await.unwrap();
        assert!(!ctx.in_transaction());
    }
}
