//! HTTP surface tests
//!
//! The event endpoint must report nominal completion (200) once a
//! batch has been walked, no matter how many notifications or records
//! failed inside it. Only a body that is not an S3 event at all is
//! rejected.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use nfi_ingest::api::{create_router, AppState};
use nfi_ingest::store::MemoryStore;
use nfi_ingest::{BatchIngestor, NotificationDispatcher};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

mod common;

use common::{s3_event_json, valid_record, MapRetriever};

/// Test helper to create an app over fake backends
fn test_app(retriever: MapRetriever, store: Arc<MemoryStore>) -> Router {
    let dispatcher =
        NotificationDispatcher::new(Arc::new(retriever), BatchIngestor::new(store));
    create_router(AppState {
        dispatcher: Arc::new(dispatcher),
    })
}

async fn post_events(app: Router, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/events")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}

#[tokio::test]
async fn test_events_returns_ok_with_summary() {
    let store = Arc::new(MemoryStore::new());
    let content = json!([valid_record("nf-1", 10.0), valid_record("nf-2", 20.0)]);
    let retriever = MapRetriever::new().with_object("uploads", "notas.json", content.to_string());
    let app = test_app(retriever, store.clone());

    let (status, body) =
        post_events(app, s3_event_json(&[("uploads", "notas.json")]).to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["objects_processed"], 1);
    assert_eq!(body["summary"]["records_succeeded"], 2);
    assert!(body["message"].as_str().unwrap().contains("2 of 2"));
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_events_reports_nominal_completion_despite_failures() {
    let store = Arc::new(MemoryStore::new());
    // Nothing registered: every notification fails retrieval.
    let app = test_app(MapRetriever::new(), store.clone());

    let (status, body) = post_events(
        app,
        s3_event_json(&[("uploads", "gone.json"), ("uploads", "also-gone.json")]).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["objects_processed"], 2);
    assert_eq!(body["summary"]["objects_failed"], 2);
    assert_eq!(body["summary"]["records_succeeded"], 0);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_non_event_body_is_rejected() {
    let app = test_app(MapRetriever::new(), Arc::new(MemoryStore::new()));

    let (status, _) = post_events(app, json!({ "not": "an event" }).to_string()).await;

    assert!(status.is_client_error(), "got {}", status);
}

#[tokio::test]
async fn test_empty_batch_is_still_nominal() {
    let app = test_app(MapRetriever::new(), Arc::new(MemoryStore::new()));

    let (status, body) = post_events(app, json!({ "Records": [] }).to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["objects_processed"], 0);
}

#[tokio::test]
async fn test_health_check() {
    let app = test_app(MapRetriever::new(), Arc::new(MemoryStore::new()));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
