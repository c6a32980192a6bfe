//! HTTP event surface
//!
//! `POST /events` is the sole entry point for notification batches.
//! Once the batch has been fully walked the endpoint answers 200 with
//! a human-readable summary; it never signals partial failure outward.
//! Failures are visible only in logs and in the summary counts.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::dispatcher::NotificationDispatcher;
use crate::notification::S3Event;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<NotificationDispatcher>,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/events", post(handle_events))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Notification intake handler
///
/// A body that does not deserialize as an S3 event is the caller's
/// contract violation and is rejected by the extractor before any
/// processing; everything past that point completes nominally.
async fn handle_events(
    State(state): State<AppState>,
    Json(event): Json<S3Event>,
) -> impl IntoResponse {
    let summary = state.dispatcher.handle(event).await;

    (
        StatusCode::OK,
        Json(json!({
            "message": format!(
                "Invoice object processing complete: {} of {} records stored across {} object(s)",
                summary.records_succeeded, summary.records_total, summary.objects_processed
            ),
            "summary": summary,
        })),
    )
}

/// Health check handler
async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}
