//! Persistence for call events

use async_trait::async_trait;
use callhook_db::{DbError, DbPool, ToSql};
use tracing::{debug, instrument};

use crate::category::CallCategory;
use crate::record::CallEventRecord;

/// Destination for validated call events.
#[async_trait]
pub trait CallEventStore: Send + Sync + 'static {
    /// Insert one record into the table bound to `category`, returning the
    /// number of rows written.
    async fn insert(&self, category: CallCategory, record: &CallEventRecord) -> Result<u64, DbError>;

    /// Round-trip latency to the backing store in milliseconds.
    async fn ping(&self) -> Result<u64, DbError>;
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgCallEventStore {
    db: DbPool,
}

impl PgCallEventStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CallEventStore for PgCallEventStore {
    #[instrument(skip(self, record), fields(table = category.table_name()))]
    async fn insert(&self, category: CallCategory, record: &CallEventRecord) -> Result<u64, DbError> {
        // The pooled connection goes back to the pool when `client` drops,
        // on every exit path.
        let client = self.db.get().await?;

        let statement = client
            .prepare_cached(category.insert_sql())
            .await
            .map_err(DbError::Query)?;

        let rows = client
            .execute(&statement, &bind_params(record))
            .await
            .map_err(DbError::Query)?;

        debug!(rows, "Insert executed");
        Ok(rows)
    }

    async fn ping(&self) -> Result<u64, DbError> {
        self.db.ping().await
    }
}

/// Parameters in the column order of [`CallCategory::insert_sql`].
fn bind_params(record: &CallEventRecord) -> [&(dyn ToSql + Sync); 13] {
    [
        &record.call_id,
        &record.dispnumber,
        &record.caller_id,
        &record.start_time,
        &record.answer_stamp,
        &record.end_time,
        &record.call_type,
        &record.call_duration,
        &record.destination,
        &record.status,
        &record.resource_url,
        &record.missed_from,
        &record.hangup_cause,
    ]
}
