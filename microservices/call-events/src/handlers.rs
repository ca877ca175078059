//! HTTP handlers for the Call Events API

use axum::{
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use callhook_core::{HealthStatus, ReadinessStatus};
use serde_json::{Map, Value};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::category::CallCategory;
use crate::error::{CallEventError, Result};
use crate::recorder::StatsSnapshot;
use crate::AppState;

// ============================================
// Webhook Handlers
// ============================================

/// Shared handler behind every webhook route; `category` is bound by the route.
pub async fn call_event(
    state: AppState,
    category: CallCategory,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Response {
    let span = info_span!(
        "call_event",
        request_id = %Uuid::new_v4(),
        table = category.table_name()
    );

    async move {
        let body = match body {
            Ok(body) => body,
            Err(rejection) => {
                warn!(status = %rejection.status(), error = %rejection, "Request body rejected");
                return CallEventError::BodyRejected(rejection).into_response();
            }
        };

        info!(bytes = body.len(), "Data received");

        match parse_payload(&body) {
            Ok(payload) => state.recorder.record(category, &payload).await.into_response(),
            Err(err) => err.into_response(),
        }
    }
    .instrument(span)
    .await
}

/// Decode the body into a non-empty JSON object.
///
/// The content type is not checked; providers are inconsistent about it.
pub fn parse_payload(body: &[u8]) -> Result<Map<String, Value>> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) if !map.is_empty() => Ok(map),
        _ => Err(CallEventError::InvalidRequestBody),
    }
}

// ============================================
// Health & Metrics Handlers
// ============================================

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(state.health())
}

pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadinessStatus>) {
    let status = state.readiness().await;
    let code = if status.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}

pub async fn stats(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.recorder.stats().snapshot())
}
