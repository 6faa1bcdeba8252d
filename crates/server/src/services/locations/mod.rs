//! Location service.
//!
//! The only place location rules are enforced: nothing reaches the repository
//! without passing [`validate`], and raw path/query strings are parsed here
//! before storage is touched.

mod error;

pub use error::LocationServiceError;

use sqlx::SqlitePool;

use pinmap_core::{
    Location, LocationCandidate, ValidationReport, parse_limit, parse_location_id, validate,
};

use crate::db::LocationRepository;

/// Location service.
///
/// Validates proposed locations and translates repository outcomes into
/// domain errors.
pub struct LocationService<'a> {
    locations: LocationRepository<'a>,
}

impl<'a> LocationService<'a> {
    /// Create a new location service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            locations: LocationRepository::new(pool),
        }
    }

    /// Check a candidate against every location rule.
    #[must_use]
    pub fn validate(candidate: &LocationCandidate) -> ValidationReport {
        validate(candidate)
    }

    /// Validate and persist a new location.
    ///
    /// # Errors
    ///
    /// Returns `LocationServiceError::Validation` with every violated rule if
    /// the candidate is invalid; nothing is written in that case.
    /// Returns `LocationServiceError::Repository` if the insert fails.
    pub async fn create(
        &self,
        candidate: &LocationCandidate,
    ) -> Result<Location, LocationServiceError> {
        let valid = Self::validate(candidate)
            .into_result()
            .map_err(LocationServiceError::Validation)?;

        let location = self
            .locations
            .insert(valid.latitude(), valid.longitude(), valid.address())
            .await?;

        tracing::info!(location_id = %location.id, "Location created");
        Ok(location)
    }

    /// List every location, newest first.
    ///
    /// # Errors
    ///
    /// Returns `LocationServiceError::Repository` if the query fails.
    pub async fn list(&self) -> Result<Vec<Location>, LocationServiceError> {
        Ok(self.locations.find_all().await?)
    }

    /// List the newest locations.
    ///
    /// `raw_limit` comes straight from the query string; absent, non-numeric
    /// and non-positive values mean the default of 10.
    ///
    /// # Errors
    ///
    /// Returns `LocationServiceError::Repository` if the query fails.
    pub async fn list_recent(
        &self,
        raw_limit: Option<&str>,
    ) -> Result<Vec<Location>, LocationServiceError> {
        let limit = parse_limit(raw_limit);
        Ok(self.locations.find_recent(i64::from(limit)).await?)
    }

    /// Get a single location.
    ///
    /// # Errors
    ///
    /// Returns `LocationServiceError::InvalidId` if `raw_id` is not an integer.
    /// Returns `LocationServiceError::NotFound` if no location has that ID.
    /// Returns `LocationServiceError::Repository` if the query fails.
    pub async fn get_one(&self, raw_id: &str) -> Result<Location, LocationServiceError> {
        let id = parse_location_id(raw_id)?;
        self.locations
            .find_by_id(id)
            .await?
            .ok_or(LocationServiceError::NotFound(id))
    }

    /// Delete a location.
    ///
    /// # Errors
    ///
    /// Returns `LocationServiceError::InvalidId` if `raw_id` is not an integer.
    /// Returns `LocationServiceError::NotFound` if no location has that ID.
    /// Returns `LocationServiceError::Repository` if the delete fails.
    pub async fn remove(&self, raw_id: &str) -> Result<(), LocationServiceError> {
        let id = parse_location_id(raw_id)?;
        if !self.locations.delete_by_id(id).await? {
            return Err(LocationServiceError::NotFound(id));
        }

        tracing::info!(location_id = %id, "Location deleted");
        Ok(())
    }
}
