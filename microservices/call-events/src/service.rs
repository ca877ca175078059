//! Service lifecycle wiring for the Call Events microservice

use std::sync::Arc;

use async_trait::async_trait;
use callhook_core::{CallhookError, CallhookService, HealthStatus, ReadinessStatus, Result};
use callhook_db::DbPool;
use tokio::sync::Notify;
use tracing::info;

use crate::config::CallEventsConfig;
use crate::routes::create_router;
use crate::store::PgCallEventStore;
use crate::{AppState, SERVICE_ID};

pub struct CallEventsService {
    config: CallEventsConfig,
    state: AppState,
    shutdown: Arc<Notify>,
}

impl CallEventsService {
    /// Build the service; the pool connects lazily, so a down database does
    /// not prevent startup.
    pub fn new(config: CallEventsConfig) -> Result<Self> {
        let db = DbPool::new(&config.pool).map_err(|e| CallhookError::Database(e.to_string()))?;
        let state = AppState::new(Arc::new(PgCallEventStore::new(db)));

        Ok(Self {
            config,
            state,
            shutdown: Arc::new(Notify::new()),
        })
    }
}

#[async_trait]
impl CallhookService for CallEventsService {
    fn service_id(&self) -> &'static str {
        SERVICE_ID
    }

    async fn health(&self) -> HealthStatus {
        self.state.health()
    }

    async fn ready(&self) -> ReadinessStatus {
        self.state.readiness().await
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Shutting down Call Events Service");
        // notify_one keeps a permit if the server is not waiting yet
        self.shutdown.notify_one();
        Ok(())
    }

    async fn start(&self) -> Result<()> {
        info!(
            service = %self.config.service.service_name,
            http = %self.config.service.http_bind,
            route_prefix = %self.config.route_prefix,
            "Starting Call Events server"
        );

        let app = create_router(self.state.clone(), &self.config.route_prefix);
        let listener = tokio::net::TcpListener::bind(self.config.service.http_bind).await?;

        let shutdown = self.shutdown.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.notified().await })
            .await?;

        Ok(())
    }
}
