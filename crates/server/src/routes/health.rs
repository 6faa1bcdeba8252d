//! Process health endpoints.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use serde_json::{Value, json};

use crate::db::LocationRepository;
use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns `{"status": "OK"}` if the server is running. Does not check dependencies.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "OK", "timestamp": Utc::now() }))
}

/// Readiness health check endpoint.
///
/// Counts the stored locations, which proves both that the database is
/// reachable and that the `locations` table exists. Returns 503 Service
/// Unavailable otherwise.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match LocationRepository::new(state.pool()).count().await {
        Ok(count) => {
            tracing::debug!(count, "Readiness check passed");
            StatusCode::OK
        }
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
