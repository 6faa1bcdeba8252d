//! Location service error types.

use thiserror::Error;

use pinmap_core::{InvalidIdError, LocationId};

use crate::db::RepositoryError;

/// Errors that can occur during location operations.
#[derive(Debug, Error)]
pub enum LocationServiceError {
    /// The payload violated one or more location rules.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// The supplied ID is not an integer.
    #[error(transparent)]
    InvalidId(#[from] InvalidIdError),

    /// No location has the given ID.
    #[error("location {0} not found")]
    NotFound(LocationId),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
