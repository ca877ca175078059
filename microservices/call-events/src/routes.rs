//! Router configuration for the Call Events API

use std::any::Any;

use axum::{
    extract::{rejection::BytesRejection, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::category::CallCategory;
use crate::error::CallEventError;
use crate::handlers;
use crate::AppState;

/// Create the main router with all routes
///
/// Webhook routes are nested under `route_prefix` when it is non-empty;
/// health endpoints always stay at the root.
pub fn create_router(state: AppState, route_prefix: &str) -> Router {
    let webhooks = CallCategory::ALL
        .into_iter()
        .fold(Router::new(), |router, category| {
            router.route(
                category.route(),
                post(move |State(state): State<AppState>, body: Result<Bytes, BytesRejection>| {
                    handlers::call_event(state, category, body)
                }),
            )
        });

    let webhooks = if route_prefix.is_empty() {
        webhooks
    } else {
        Router::new().nest(route_prefix, webhooks)
    };

    Router::new()
        // Health & Metrics
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready))
        .route("/stats", get(handlers::stats))
        // Call event webhooks
        .merge(webhooks)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Turn a panic inside request processing into a 500 with the panic message.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic message".to_string()
    };

    tracing::error!(error = %message, "Error processing request");
    CallEventError::Unhandled(message).into_response()
}
