//! Location record types.
//!
//! A location moves through three shapes over its lifecycle:
//!
//! - [`NewLocation`] / [`LocationCandidate`] - proposed by a client, no ID
//! - [`ValidLocation`] - passed validation, safe to persist
//! - [`Location`] - persisted, carries the server-assigned ID and timestamp

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::id::LocationId;

/// Minimum valid latitude in degrees.
pub const MIN_LATITUDE: f64 = -90.0;
/// Maximum valid latitude in degrees.
pub const MAX_LATITUDE: f64 = 90.0;
/// Minimum valid longitude in degrees.
pub const MIN_LONGITUDE: f64 = -180.0;
/// Maximum valid longitude in degrees.
pub const MAX_LONGITUDE: f64 = 180.0;

/// A persisted map pin.
///
/// Only the server constructs these; the `id` and `created_at` fields are
/// assigned by storage at insertion time and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Server-assigned, monotonically increasing ID.
    pub id: LocationId,
    /// Latitude in degrees, within [-90, 90].
    pub latitude: f64,
    /// Longitude in degrees, within [-180, 180].
    pub longitude: f64,
    /// Free-form, trimmed, non-empty address.
    pub address: String,
    /// When the row was inserted.
    pub created_at: DateTime<Utc>,
}

/// A location proposed by a client.
///
/// Has no ID: a location only gains one by being persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

impl NewLocation {
    /// Create a new location proposal.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, address: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            address: address.into(),
        }
    }
}

/// An untyped location payload as received over the wire.
///
/// Fields are kept as raw JSON so validation can report a wrong type or a
/// missing field as a rule violation instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationCandidate {
    #[serde(default)]
    pub latitude: Value,
    #[serde(default)]
    pub longitude: Value,
    #[serde(default)]
    pub address: Value,
}

impl From<NewLocation> for LocationCandidate {
    fn from(location: NewLocation) -> Self {
        Self {
            latitude: Value::from(location.latitude),
            longitude: Value::from(location.longitude),
            address: Value::String(location.address),
        }
    }
}

/// A location that passed validation.
///
/// Constructed only by [`crate::validation::validate`], so holding one proves
/// the coordinate and address constraints hold.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidLocation {
    latitude: f64,
    longitude: f64,
    address: String,
}

impl ValidLocation {
    pub(crate) const fn new(latitude: f64, longitude: f64, address: String) -> Self {
        Self {
            latitude,
            longitude,
            address,
        }
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// The address, already trimmed.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_location_json_shape() {
        let location = Location {
            id: LocationId::new(1),
            latitude: -33.8688,
            longitude: 151.2093,
            address: "Sydney".to_string(),
            created_at: "2026-01-02T03:04:05.678Z".parse().unwrap(),
        };

        let json = serde_json::to_value(&location).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["latitude"], -33.8688);
        assert_eq!(json["longitude"], 151.2093);
        assert_eq!(json["address"], "Sydney");
        assert_eq!(json["created_at"], "2026-01-02T03:04:05.678Z");
    }

    #[test]
    fn test_candidate_tolerates_missing_and_mistyped_fields() {
        let candidate: LocationCandidate =
            serde_json::from_str(r#"{"latitude": "north", "address": 12}"#).unwrap();

        assert_eq!(candidate.latitude, Value::String("north".to_string()));
        assert_eq!(candidate.longitude, Value::Null);
        assert_eq!(candidate.address, Value::from(12));
    }

    #[test]
    fn test_candidate_from_new_location() {
        let candidate = LocationCandidate::from(NewLocation::new(1.5, -2.5, "Somewhere"));
        assert_eq!(candidate.latitude.as_f64(), Some(1.5));
        assert_eq!(candidate.longitude.as_f64(), Some(-2.5));
        assert_eq!(candidate.address.as_str(), Some("Somewhere"));
    }
}
