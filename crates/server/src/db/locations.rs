//! Location repository for database operations.
//!
//! Owns the SQL for the `locations` table and the mapping from rows to
//! [`Location`] records. Listings are always ordered newest first, with the
//! row ID breaking ties between rows inserted in the same millisecond.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use pinmap_core::{Location, LocationId, normalize_limit};

use super::RepositoryError;

const SELECT_COLUMNS: &str = "SELECT id, latitude, longitude, address, created_at FROM locations";

/// Result of a single-row write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOutcome {
    /// Row ID assigned by `SQLite`.
    pub generated_id: LocationId,
    /// Number of rows the statement changed.
    pub rows_affected: u64,
}

#[derive(Debug, sqlx::FromRow)]
struct LocationRow {
    id: LocationId,
    latitude: f64,
    longitude: f64,
    address: String,
    created_at: DateTime<Utc>,
}

impl From<LocationRow> for Location {
    fn from(row: LocationRow) -> Self {
        Self {
            id: row.id,
            latitude: row.latitude,
            longitude: row.longitude,
            address: row.address,
            created_at: row.created_at,
        }
    }
}

/// Repository for location database operations.
pub struct LocationRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> LocationRepository<'a> {
    /// Create a new location repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a location and return the stored record.
    ///
    /// The caller is responsible for validating the values first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the inserted row cannot be read back.
    pub async fn insert(
        &self,
        latitude: f64,
        longitude: f64,
        address: &str,
    ) -> Result<Location, RepositoryError> {
        let outcome = self.insert_row(latitude, longitude, address).await?;

        tracing::debug!(
            location_id = %outcome.generated_id,
            rows_affected = outcome.rows_affected,
            "Inserted location"
        );

        self.find_by_id(outcome.generated_id)
            .await?
            .ok_or_else(|| {
                RepositoryError::DataCorruption(format!(
                    "location {} missing after insert",
                    outcome.generated_id
                ))
            })
    }

    /// Execute the INSERT and report the generated ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn insert_row(
        &self,
        latitude: f64,
        longitude: f64,
        address: &str,
    ) -> Result<InsertOutcome, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO locations (latitude, longitude, address)
            VALUES (?, ?, ?)
            ",
        )
        .bind(latitude)
        .bind(longitude)
        .bind(address)
        .execute(self.pool)
        .await?;

        Ok(InsertOutcome {
            generated_id: LocationId::new(result.last_insert_rowid()),
            rows_affected: result.rows_affected(),
        })
    }

    /// Get every location, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_all(&self) -> Result<Vec<Location>, RepositoryError> {
        let rows = sqlx::query_as::<_, LocationRow>(&format!(
            "{SELECT_COLUMNS} ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Location::from).collect())
    }

    /// Get a location by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: LocationId) -> Result<Option<Location>, RepositoryError> {
        let row = sqlx::query_as::<_, LocationRow>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Location::from))
    }

    /// Get the newest locations, at most `limit` of them.
    ///
    /// Non-positive limits fall back to the default recent limit.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_recent(&self, limit: i64) -> Result<Vec<Location>, RepositoryError> {
        let limit = normalize_limit(limit);
        let rows = sqlx::query_as::<_, LocationRow>(&format!(
            "{SELECT_COLUMNS} ORDER BY created_at DESC, id DESC LIMIT ?"
        ))
        .bind(i64::from(limit))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Location::from).collect())
    }

    /// Delete a location by its ID.
    ///
    /// Returns `true` if a row was removed, `false` if none matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_by_id(&self, id: LocationId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM locations WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count stored locations.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM locations")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn test_insert_returns_materialized_record() {
        let pool = test_pool().await;
        let repo = LocationRepository::new(&pool);

        let location = repo.insert(-33.8688, 151.2093, "Sydney").await.unwrap();

        assert!(location.id.as_i64() > 0);
        assert!((location.latitude - -33.8688).abs() < f64::EPSILON);
        assert!((location.longitude - 151.2093).abs() < f64::EPSILON);
        assert_eq!(location.address, "Sydney");
        assert!(location.created_at <= Utc::now());
    }

    #[tokio::test]
    async fn test_insert_row_reports_generated_id() {
        let pool = test_pool().await;
        let repo = LocationRepository::new(&pool);

        let first = repo.insert_row(1.0, 2.0, "First").await.unwrap();
        let second = repo.insert_row(3.0, 4.0, "Second").await.unwrap();

        assert_eq!(first.rows_affected, 1);
        assert_eq!(second.rows_affected, 1);
        assert!(second.generated_id > first.generated_id);
    }

    #[tokio::test]
    async fn test_find_all_empty() {
        let pool = test_pool().await;
        let repo = LocationRepository::new(&pool);

        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_all_is_newest_first() {
        let pool = test_pool().await;
        let repo = LocationRepository::new(&pool);

        let a = repo.insert(1.0, 1.0, "A").await.unwrap();
        let b = repo.insert(2.0, 2.0, "B").await.unwrap();
        let c = repo.insert(3.0, 3.0, "C").await.unwrap();

        let ids: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec![c.id, b.id, a.id]);
    }

    #[tokio::test]
    async fn test_find_by_id_is_stable_between_writes() {
        let pool = test_pool().await;
        let repo = LocationRepository::new(&pool);
        let created = repo.insert(10.0, 20.0, "Stable").await.unwrap();

        let first = repo.find_by_id(created.id).await.unwrap();
        let second = repo.find_by_id(created.id).await.unwrap();

        assert_eq!(first, Some(created));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_find_by_id_absent() {
        let pool = test_pool().await;
        let repo = LocationRepository::new(&pool);

        assert!(repo.find_by_id(LocationId::new(999)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_recent_respects_limit() {
        let pool = test_pool().await;
        let repo = LocationRepository::new(&pool);
        for i in 0..12 {
            repo.insert(f64::from(i), 0.0, &format!("Pin {i}"))
                .await
                .unwrap();
        }

        let recent = repo.find_recent(3).await.unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].address, "Pin 11");
        assert_eq!(recent[2].address, "Pin 9");

        // Non-positive limits fall back to the default of 10
        assert_eq!(repo.find_recent(0).await.unwrap().len(), 10);
        assert_eq!(repo.find_recent(-1).await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let pool = test_pool().await;
        let repo = LocationRepository::new(&pool);
        let kept = repo.insert(1.0, 1.0, "Kept").await.unwrap();
        let doomed = repo.insert(2.0, 2.0, "Doomed").await.unwrap();

        assert!(!repo.delete_by_id(LocationId::new(12_345)).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 2);

        assert!(repo.delete_by_id(doomed.id).await.unwrap());
        assert!(repo.find_by_id(doomed.id).await.unwrap().is_none());
        assert_eq!(repo.find_all().await.unwrap(), vec![kept]);

        // Deleting twice is not an error
        assert!(!repo.delete_by_id(doomed.id).await.unwrap());
    }
}
