//! Callhook database access
//!
//! PostgreSQL connection pooling for webhook services. Connections are
//! checked out per operation and returned to the pool when the guard drops.

mod error;
mod pool;

pub use error::{DbError, Result};
pub use pool::{DbPool, PoolConfig};

/// Re-export tokio-postgres types for convenience
pub use tokio_postgres::types::ToSql;
