//! HTTP route handlers for the Pinmap server.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                    - Liveness check
//! GET    /health/ready              - Readiness check (database)
//!
//! # Locations API
//! GET    /api/locations             - All locations, newest first
//! GET    /api/locations/recent      - Newest N locations (?limit=N, default 10)
//! GET    /api/locations/health      - API liveness
//! GET    /api/locations/{id}        - One location
//! POST   /api/locations             - Create a location
//! DELETE /api/locations/{id}        - Delete a location
//! ```
//!
//! Anything else answers 404 with `{"success": false, "error": "Route not found"}`.

pub mod health;
pub mod locations;

use axum::{
    Router,
    extract::Request,
    middleware,
    routing::get,
};
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Base path of the locations API.
pub const LOCATIONS_PATH: &str = "/api/locations";

/// Create the locations API router.
pub fn location_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(locations::index).post(locations::create))
        .route("/recent", get(locations::recent))
        .route("/health", get(locations::health))
        .route("/{id}", get(locations::show).delete(locations::destroy))
}

/// Build the complete application router with its middleware stack.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest(LOCATIONS_PATH, location_routes())
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .layer(CorsLayer::permissive())
}

/// Trim trailing slashes before routing, so `/api/locations/` reaches the
/// same handlers as `/api/locations`.
///
/// Applied outside the router because path rewriting must happen before
/// route matching.
pub fn with_normalized_paths(router: Router) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router)
}

async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_owned())
}
