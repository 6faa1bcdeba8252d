//! Location API handlers.
//!
//! Every response is a JSON [`Envelope`]; see [`crate::error::AppError`] for
//! the failure shapes.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;

use pinmap_core::{Envelope, Location, LocationCandidate};

use crate::error::{AppError, Result, ServiceResultExt};
use crate::state::AppState;

/// Query parameters for `GET /api/locations/recent`.
#[derive(Debug, Default, Deserialize)]
pub struct RecentQuery {
    /// Kept as a raw string so malformed values fall back to the default.
    pub limit: Option<String>,
}

/// `GET /api/locations` - every location, newest first.
///
/// # Errors
///
/// Returns `AppError::Persistence` if the query fails.
pub async fn index(State(state): State<AppState>) -> Result<Json<Envelope<Vec<Location>>>> {
    let locations = state
        .locations()
        .list()
        .await
        .or_fail("Failed to fetch locations")?;

    Ok(Json(Envelope::list(locations)))
}

/// `GET /api/locations/recent?limit=N` - the newest `N` locations (default 10).
///
/// # Errors
///
/// Returns `AppError::Persistence` if the query fails.
pub async fn recent(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Envelope<Vec<Location>>>> {
    let locations = state
        .locations()
        .list_recent(query.limit.as_deref())
        .await
        .or_fail("Failed to fetch recent locations")?;

    Ok(Json(Envelope::list(locations)))
}

/// `GET /api/locations/{id}` - a single location.
///
/// # Errors
///
/// Returns `AppError::InvalidId` for a non-integer ID, `AppError::NotFound`
/// if no location matches, `AppError::Persistence` if the query fails.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Location>>> {
    let location = state
        .locations()
        .get_one(&id)
        .await
        .or_fail("Failed to fetch location")?;

    Ok(Json(Envelope::data(location)))
}

/// `POST /api/locations` - validate and save a new location.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for an unparseable body,
/// `AppError::Validation` with every violated rule, or
/// `AppError::Persistence` if the insert fails.
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LocationCandidate>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Location>>)> {
    let Json(candidate) = payload.map_err(|rejection| AppError::BadRequest {
        error: "Invalid request body".to_owned(),
        detail: rejection.body_text(),
    })?;

    let location = state
        .locations()
        .create(&candidate)
        .await
        .or_fail("Failed to save location")?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::data(location).with_message("Location saved successfully")),
    ))
}

/// `DELETE /api/locations/{id}` - delete a location.
///
/// # Errors
///
/// Returns `AppError::InvalidId` for a non-integer ID, `AppError::NotFound`
/// if no location matches, `AppError::Persistence` if the delete fails.
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<()>>> {
    state
        .locations()
        .remove(&id)
        .await
        .or_fail("Failed to delete location")?;

    Ok(Json(Envelope::confirmation("Location deleted successfully")))
}

/// `GET /api/locations/health` - API liveness.
pub async fn health() -> Json<Envelope<()>> {
    Json(Envelope::confirmation("Locations API is running").with_timestamp(Utc::now()))
}
