//! Webhook route integration tests
//!
//! Drives the real router with an in-memory store that records every
//! statement it would have executed.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use call_events::{create_router, AppState, CallCategory, CallEventRecord, CallEventStore};
use callhook_db::DbError;
use parking_lot::Mutex;
use serde_json::{json, Value};
use tower::ServiceExt;

const BODY_LIMIT: usize = 64 * 1024;

#[derive(Clone, Copy, PartialEq)]
enum Behavior {
    Accept,
    RefuseConnection,
    Panic,
}

struct RecordingStore {
    behavior: Behavior,
    executed: Mutex<Vec<(CallCategory, CallEventRecord)>>,
}

impl RecordingStore {
    fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            executed: Mutex::new(Vec::new()),
        })
    }

    fn executed(&self) -> usize {
        self.executed.lock().len()
    }
}

#[async_trait]
impl CallEventStore for RecordingStore {
    async fn insert(&self, category: CallCategory, record: &CallEventRecord) -> Result<u64, DbError> {
        self.executed.lock().push((category, record.clone()));
        match self.behavior {
            Behavior::Accept => Ok(1),
            Behavior::RefuseConnection => Err(DbError::Pool(
                "error connecting to server: Connection refused (os error 111)".to_string(),
            )),
            Behavior::Panic => panic!("driver state corrupted"),
        }
    }

    async fn ping(&self) -> Result<u64, DbError> {
        match self.behavior {
            Behavior::RefuseConnection => Err(DbError::Pool("Connection refused".to_string())),
            _ => Ok(1),
        }
    }
}

fn app(store: &Arc<RecordingStore>) -> Router {
    create_router(AppState::new(store.clone()), "")
}

fn full_payload() -> Value {
    json!({
        "callID": "a1b2c3",
        "dispnumber": "+918069000000",
        "caller_id": "+919876543210",
        "start_time": "2024-01-15 10:30:00",
        "answer_stamp": "2024-01-15 10:30:04",
        "end_time": "2024-01-15 10:35:41",
        "callType": "inbound",
        "call_duration": 341,
        "destination": "+918069000001",
        "status": "answered",
        "resource_url": "https://recordings.example/a1b2c3.mp3",
        "missedFrom": null,
        "hangup_cause": "NORMAL_CLEARING"
    })
}

async fn post(app: Router, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn answered_inbound_with_full_payload_is_inserted() {
    let store = RecordingStore::new(Behavior::Accept);
    let (status, body) = post(app(&store), "/answered-inbound", full_payload().to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Data inserted into answered_inbound_calls" }));

    let executed = store.executed.lock();
    assert_eq!(executed.len(), 1);
    let (category, record) = &executed[0];
    assert_eq!(*category, CallCategory::AnsweredInbound);
    assert_eq!(record.call_id.as_deref(), Some("a1b2c3"));
    assert_eq!(record.call_duration.as_deref(), Some("341"));
    assert!(record.end_time.is_some());
}

#[tokio::test]
async fn every_route_lands_in_its_own_table() {
    for category in CallCategory::ALL {
        let store = RecordingStore::new(Behavior::Accept);
        let (status, body) = post(app(&store), category.route(), full_payload().to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["message"],
            format!("Data inserted into {}", category.table_name())
        );
        assert_eq!(store.executed.lock()[0].0, category);
    }
}

#[tokio::test]
async fn empty_object_is_rejected_before_the_recorder() {
    let store = RecordingStore::new(Behavior::Accept);
    let (status, body) = post(app(&store), "/missed-outbound", "{}").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid request data" }));
    assert_eq!(store.executed(), 0);
}

#[tokio::test]
async fn malformed_and_missing_bodies_are_rejected() {
    for raw in ["", "{\"callID\":", "[1, 2]"] {
        let store = RecordingStore::new(Behavior::Accept);
        let (status, body) = post(app(&store), "/missed-inbound", raw.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{raw:?}");
        assert_eq!(body["error"], "Invalid request data");
        assert_eq!(store.executed(), 0);
    }
}

#[tokio::test]
async fn oversized_body_is_rejected_with_a_json_error() {
    let store = RecordingStore::new(Behavior::Accept);
    let mut payload = full_payload();
    payload["resource_url"] = json!("x".repeat(3 * 1024 * 1024));

    let (status, body) = post(app(&store), "/answered-inbound", payload.to_string()).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].is_string(), "{body}");
    assert!(body.get("message").is_none());
    assert_eq!(store.executed(), 0);
}

#[tokio::test]
async fn connection_refused_is_a_500_without_retry() {
    let store = RecordingStore::new(Behavior::RefuseConnection);
    let (status, body) = post(app(&store), "/answered-outbound", full_payload().to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("Connection refused"), "{message}");
    assert!(body.get("message").is_none());
    assert_eq!(store.executed(), 1);
}

#[tokio::test]
async fn unknown_keys_are_ignored() {
    let store = RecordingStore::new(Behavior::Accept);
    let mut payload = full_payload();
    payload["foo"] = json!("bar");

    let (status, _) = post(app(&store), "/missed-inbound", payload.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(store.executed(), 1);
}

#[tokio::test]
async fn malformed_timestamp_still_inserts() {
    let store = RecordingStore::new(Behavior::Accept);
    let (status, _) = post(
        app(&store),
        "/missed-outbound",
        json!({ "callID": "m-9", "start_time": "not-a-date", "missedFrom": "IVR" }).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let executed = store.executed.lock();
    assert_eq!(executed[0].1.start_time, None);
    assert_eq!(executed[0].1.missed_from.as_deref(), Some("IVR"));
}

#[tokio::test]
async fn panic_during_processing_becomes_a_500() {
    let store = RecordingStore::new(Behavior::Panic);
    let (status, body) = post(app(&store), "/answered-outbound", full_payload().to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "driver state corrupted" }));
}

#[tokio::test]
async fn webhooks_only_accept_post() {
    let store = RecordingStore::new(Behavior::Accept);
    let response = app(&store)
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/answered-inbound")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(store.executed(), 0);
}

#[tokio::test]
async fn route_prefix_nests_webhooks() {
    let store = RecordingStore::new(Behavior::Accept);
    let app = create_router(AppState::new(store.clone()), "/api");

    let (status, _) = post(app.clone(), "/api/answered-inbound", full_payload().to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/answered-inbound")
                .body(Body::from(full_payload().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(store.executed(), 1);
}

#[tokio::test]
async fn readiness_reflects_database_reachability() {
    let up = RecordingStore::new(Behavior::Accept);
    let response = app(&up)
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let down = RecordingStore::new(Behavior::RefuseConnection);
    let response = app(&down)
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["ready"], false);
    assert_eq!(body["dependencies"][0]["name"], "database");
}

#[tokio::test]
async fn stats_count_outcomes() {
    let store = RecordingStore::new(Behavior::Accept);
    let app = app(&store);

    post(app.clone(), "/answered-inbound", full_payload().to_string()).await;
    post(app.clone(), "/missed-inbound", full_payload().to_string()).await;
    post(app.clone(), "/missed-inbound", "{}").await;

    let response = app
        .oneshot(Request::builder().uri("/stats").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
    let stats: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(stats["received"], 2);
    assert_eq!(stats["inserted"], 2);
    assert_eq!(stats["failed"], 0);
}

#[tokio::test]
async fn health_reports_service_identity() {
    let store = RecordingStore::new(Behavior::Accept);
    let response = app(&store)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["healthy"], true);
    assert_eq!(body["service_id"], "call-events");
}
