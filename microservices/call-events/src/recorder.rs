//! Call Event Recorder
//!
//! Validates the destination category, normalizes the payload into a
//! [`CallEventRecord`] and performs a single insert. Every outcome is turned
//! into an [`EventResponse`]; nothing is retried.

use std::sync::Arc;
use std::time::Instant;

use callhook_telemetry::{Counter, Histogram};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, error, info};

use crate::category::CallCategory;
use crate::error::{CallEventError, Result};
use crate::record::{CallEventRecord, FIELD_NAMES};
use crate::response::EventResponse;
use crate::store::CallEventStore;

pub struct CallEventRecorder {
    store: Arc<dyn CallEventStore>,
    stats: RecorderStats,
}

impl CallEventRecorder {
    pub fn new(store: Arc<dyn CallEventStore>) -> Self {
        Self {
            store,
            stats: RecorderStats::new(),
        }
    }

    /// Record an event for a category given by name (identifier or table).
    ///
    /// Unknown categories are answered with 400 before the store is touched.
    pub async fn record_event(&self, category: &str, payload: &Map<String, Value>) -> EventResponse {
        self.stats.received.inc();

        match category.parse::<CallCategory>() {
            Ok(category) => self.insert(category, payload).await,
            Err(err) => {
                error!(category, "Invalid table name");
                self.stats.rejected.inc();
                err.into()
            }
        }
    }

    /// Record an event for an already validated category.
    pub async fn record(&self, category: CallCategory, payload: &Map<String, Value>) -> EventResponse {
        self.stats.received.inc();
        self.insert(category, payload).await
    }

    async fn insert(&self, category: CallCategory, payload: &Map<String, Value>) -> EventResponse {
        let table = category.table_name();
        match self.try_insert(category, payload).await {
            Ok(()) => {
                info!(table, "Data inserted");
                self.stats.inserted.inc();
                EventResponse::message(format!("Data inserted into {}", table))
            }
            Err(err) => {
                error!(table, error = %err, detail = ?err, "Database error");
                self.stats.failed.inc();
                err.into()
            }
        }
    }

    async fn try_insert(&self, category: CallCategory, payload: &Map<String, Value>) -> Result<()> {
        let ignored = payload
            .keys()
            .filter(|key| !FIELD_NAMES.contains(&key.as_str()))
            .count();
        if ignored > 0 {
            debug!(ignored, "Ignoring unknown payload keys");
        }

        let record = CallEventRecord::from_payload(payload);

        let started = Instant::now();
        let result = self.store.insert(category, &record).await;
        self.stats
            .insert_latency_ms
            .record(started.elapsed().as_secs_f64() * 1000.0);

        result.map(|_| ()).map_err(CallEventError::from)
    }

    pub fn stats(&self) -> &RecorderStats {
        &self.stats
    }

    pub fn store(&self) -> &Arc<dyn CallEventStore> {
        &self.store
    }
}

/// Process-lifetime counters for the recorder
pub struct RecorderStats {
    pub received: Counter,
    pub inserted: Counter,
    pub rejected: Counter,
    pub failed: Counter,
    pub insert_latency_ms: Histogram,
}

impl RecorderStats {
    fn new() -> Self {
        Self {
            received: Counter::new("call_events_received"),
            inserted: Counter::new("call_events_inserted"),
            rejected: Counter::new("call_events_rejected"),
            failed: Counter::new("call_events_failed"),
            insert_latency_ms: Histogram::new("call_events_insert_latency_ms"),
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            received: self.received.get(),
            inserted: self.inserted.get(),
            rejected: self.rejected.get(),
            failed: self.failed.get(),
            insert_latency_mean_ms: self.insert_latency_ms.mean(),
            insert_latency_p95_ms: self.insert_latency_ms.percentile(95.0),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub received: u64,
    pub inserted: u64,
    pub rejected: u64,
    pub failed: u64,
    pub insert_latency_mean_ms: f64,
    pub insert_latency_p95_ms: f64,
}
