//! Database access: connection pooling, migrations and transaction scoping.
//!
//! Uses diesel_async with bb8 for PostgreSQL connections.

mod migrations;
mod pool;
mod transaction;

pub use migrations::{MIGRATIONS, pending_migrations, revert_migrations, run_pending_migrations};
pub use pool::{AsyncDbPool, PooledConn, establish_async_connection_pool};
pub use transaction::{Database, DbConn, SharedTx, TxContext};
