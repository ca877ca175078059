//! Service infrastructure for all microservices

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

use crate::error::{CallhookError, Result};

/// How long a service gets to drain in-flight requests after `shutdown`.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Health status for liveness probes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub healthy: bool,
    pub service_id: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Readiness status for readiness probes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessStatus {
    pub ready: bool,
    pub dependencies: Vec<DependencyStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyStatus {
    pub name: String,
    pub available: bool,
    pub latency_ms: Option<u64>,
}

impl ReadinessStatus {
    /// Ready when every dependency is available.
    pub fn from_dependencies(dependencies: Vec<DependencyStatus>) -> Self {
        Self {
            ready: dependencies.iter().all(|d| d.available),
            dependencies,
        }
    }
}

/// Standard trait all microservices must implement
#[async_trait]
pub trait CallhookService: Send + Sync + 'static {
    /// Service identifier (e.g., "call-events")
    fn service_id(&self) -> &'static str;

    /// Service version
    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Health check - is the service alive?
    async fn health(&self) -> HealthStatus;

    /// Readiness check - are all dependencies available?
    async fn ready(&self) -> ReadinessStatus;

    /// Begin graceful shutdown; `start` should return soon after.
    async fn shutdown(&self) -> Result<()>;

    /// Start the service and serve until shut down
    async fn start(&self) -> Result<()>;
}

/// Standard microservice runtime bootstrap
pub struct MicroserviceRuntime {
    start_time: std::time::Instant,
}

impl MicroserviceRuntime {
    pub fn new() -> Self {
        Self {
            start_time: std::time::Instant::now(),
        }
    }

    /// Run a microservice with standard lifecycle management
    pub async fn run<S: CallhookService>(service: Arc<S>) -> Result<()> {
        let runtime = Self::new();

        info!(
            service_id = service.service_id(),
            version = service.version(),
            "Starting microservice"
        );

        let service_clone = service.clone();
        let mut service_handle = tokio::spawn(async move {
            if let Err(e) = service_clone.start().await {
                error!(code = e.error_code(), "Service error: {}", e);
            }
        });

        tokio::select! {
            _ = Self::wait_for_shutdown() => {
                info!("Shutdown signal received, gracefully stopping...");
            }
            joined = &mut service_handle => {
                return match joined {
                    Ok(()) => {
                        warn!("Service stopped on its own");
                        Ok(())
                    }
                    Err(e) => Err(CallhookError::Internal(format!("Service task failed: {}", e))),
                };
            }
        }

        if let Err(e) = service.shutdown().await {
            warn!("Error during shutdown: {}", e);
        }

        if tokio::time::timeout(SHUTDOWN_GRACE, &mut service_handle)
            .await
            .is_err()
        {
            warn!(grace_secs = SHUTDOWN_GRACE.as_secs(), "Service did not drain in time, aborting");
            service_handle.abort();
        }

        info!(
            uptime_seconds = runtime.start_time.elapsed().as_secs(),
            "Microservice stopped"
        );

        Ok(())
    }

    async fn wait_for_shutdown() {
        let ctrl_c = async {
            if let Err(e) = signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                }
                Err(e) => {
                    warn!("Failed to listen for SIGTERM: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {},
            _ = terminate => {},
        }
    }
}

impl Default for MicroserviceRuntime {
    fn default() -> Self {
        Self::new()
    }
}
