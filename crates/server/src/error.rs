//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side failures to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`, and every error renders as a JSON [`Envelope`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use pinmap_core::Envelope;

use crate::db::RepositoryError;
use crate::services::LocationServiceError;

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// The payload violated one or more location rules.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// A path parameter was not a valid location ID.
    #[error("Invalid location ID")]
    InvalidId,

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("{error}: {detail}")]
    BadRequest { error: String, detail: String },

    /// Storage failed while performing `action`.
    #[error("{action}: {source}")]
    Persistence {
        /// Client-facing description, e.g. "Failed to fetch locations".
        action: &'static str,
        source: RepositoryError,
    },
}

impl AppError {
    /// Convert a service error, naming the operation for storage failures.
    #[must_use]
    pub fn from_service(err: LocationServiceError, action: &'static str) -> Self {
        match err {
            LocationServiceError::Validation(errors) => Self::Validation(errors),
            LocationServiceError::InvalidId(_) => Self::InvalidId,
            LocationServiceError::NotFound(_) => Self::NotFound("Location not found".to_owned()),
            LocationServiceError::Repository(source) => Self::Persistence { action, source },
        }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidId | Self::BadRequest { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Extension for attaching an operation name to service results.
pub trait ServiceResultExt<T> {
    /// Map a service error to an `AppError`, naming the failed operation.
    ///
    /// # Errors
    ///
    /// Returns the converted error if `self` is an error.
    fn or_fail(self, action: &'static str) -> Result<T>;
}

impl<T> ServiceResultExt<T> for std::result::Result<T, LocationServiceError> {
    fn or_fail(self, action: &'static str) -> Result<T> {
        self.map_err(|err| AppError::from_service(err, action))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        // Don't expose internal error details to clients
        let body: Envelope<()> = match self {
            Self::Validation(errors) => Envelope::failure("Validation failed").with_errors(errors),
            Self::InvalidId => Envelope::failure("Invalid location ID"),
            Self::NotFound(what) => Envelope::failure(what),
            Self::BadRequest { error, detail } => Envelope::failure(error).with_message(detail),
            Self::Persistence { action, .. } => {
                Envelope::failure(action).with_message("Internal server error")
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pinmap_core::{InvalidIdError, LocationId};

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::Validation(vec!["bad".to_string()])),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(get_status(AppError::InvalidId), StatusCode::BAD_REQUEST);
        assert_eq!(
            get_status(AppError::NotFound("Location not found".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Persistence {
                action: "Failed to fetch locations",
                source: RepositoryError::DataCorruption("test".to_string()),
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_service_mapping() {
        let err = AppError::from_service(
            LocationServiceError::InvalidId(InvalidIdError {
                raw: "abc".to_string(),
            }),
            "Failed to fetch location",
        );
        assert!(matches!(err, AppError::InvalidId));

        let err = AppError::from_service(
            LocationServiceError::NotFound(LocationId::new(3)),
            "Failed to fetch location",
        );
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_validation_body_lists_every_error() {
        let response =
            AppError::Validation(vec!["first".to_string(), "second".to_string()]).into_response();
        let json = body_json(response).await;

        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Validation failed");
        assert_eq!(json["errors"], serde_json::json!(["first", "second"]));
    }

    #[tokio::test]
    async fn test_persistence_body_hides_internal_detail() {
        let response = AppError::Persistence {
            action: "Failed to save location",
            source: RepositoryError::DataCorruption("disk on fire at /var/db".to_string()),
        }
        .into_response();
        let json = body_json(response).await;

        assert_eq!(json["error"], "Failed to save location");
        assert_eq!(json["message"], "Internal server error");
        assert!(!json.to_string().contains("disk on fire"));
    }
}
