//! Call Events Service binary

use std::sync::Arc;

use call_events::{CallEventsConfig, CallEventsService};
use callhook_core::MicroserviceRuntime;
use callhook_telemetry::TelemetryConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _telemetry = callhook_telemetry::init(&TelemetryConfig::from_env())?;

    info!("Starting Call Events Service");

    let config = CallEventsConfig::from_env()?;
    let service = Arc::new(CallEventsService::new(config)?);
    MicroserviceRuntime::run(service).await?;

    Ok(())
}
