//! Call Events Service
//!
//! Webhook intake for telephony call events:
//! - Four POST endpoints, one per call category (answered/missed, inbound/outbound)
//! - Timestamp normalization with lenient fallback to NULL
//! - One parameterized insert per event into the category's table
//! - Health, readiness and counter endpoints

pub mod category;
pub mod config;
pub mod error;
pub mod handlers;
pub mod normalize;
pub mod record;
pub mod recorder;
pub mod response;
pub mod routes;
pub mod service;
pub mod store;

use std::sync::Arc;
use std::time::Instant;

use callhook_core::{DependencyStatus, HealthStatus, ReadinessStatus};

pub use category::CallCategory;
pub use config::CallEventsConfig;
pub use error::{CallEventError, Result};
pub use normalize::normalize_timestamp;
pub use record::CallEventRecord;
pub use recorder::{CallEventRecorder, RecorderStats, StatsSnapshot};
pub use response::{EventResponse, ResponseBody};
pub use routes::create_router;
pub use service::CallEventsService;
pub use store::{CallEventStore, PgCallEventStore};

pub const SERVICE_ID: &str = "call-events";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub recorder: Arc<CallEventRecorder>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn CallEventStore>) -> Self {
        Self {
            recorder: Arc::new(CallEventRecorder::new(store)),
            start_time: Instant::now(),
        }
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            healthy: true,
            service_id: SERVICE_ID.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    pub async fn readiness(&self) -> ReadinessStatus {
        let database = match self.recorder.store().ping().await {
            Ok(latency_ms) => DependencyStatus {
                name: "database".to_string(),
                available: true,
                latency_ms: Some(latency_ms),
            },
            Err(e) => {
                tracing::warn!(error = %e, "Database readiness probe failed");
                DependencyStatus {
                    name: "database".to_string(),
                    available: false,
                    latency_ms: None,
                }
            }
        };

        ReadinessStatus::from_dependencies(vec![database])
    }
}
