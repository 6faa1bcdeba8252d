//! Location payload validation.
//!
//! Every rule is checked independently so a client gets the complete list of
//! problems with its payload in one round trip.

use serde_json::Value;

use crate::types::location::{
    LocationCandidate, MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE, ValidLocation,
};

/// Reported when latitude is missing, not a number, or out of range.
pub const INVALID_LATITUDE: &str = "Invalid latitude (must be between -90 and 90)";
/// Reported when longitude is missing, not a number, or out of range.
pub const INVALID_LONGITUDE: &str = "Invalid longitude (must be between -180 and 180)";
/// Reported when the address is missing, not a string, or blank.
pub const INVALID_ADDRESS: &str = "Address is required and must be a non-empty string";

/// Outcome of validating a [`LocationCandidate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// One message per violated rule, in field order.
    pub errors: Vec<String>,
    valid: Option<ValidLocation>,
}

impl ValidationReport {
    /// Whether the candidate satisfied every rule.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.valid.is_some()
    }

    /// Convert into the validated location, or the list of violations.
    ///
    /// # Errors
    ///
    /// Returns the violated rule messages if the candidate was invalid.
    pub fn into_result(self) -> Result<ValidLocation, Vec<String>> {
        self.valid.ok_or(self.errors)
    }
}

/// Validate a location candidate against the coordinate and address rules.
///
/// # Example
///
/// ```
/// use pinmap_core::{LocationCandidate, NewLocation, validate};
///
/// let report = validate(&LocationCandidate::from(NewLocation::new(91.0, -200.0, "")));
/// assert!(!report.is_valid());
/// assert_eq!(report.errors.len(), 3);
/// ```
#[must_use]
pub fn validate(candidate: &LocationCandidate) -> ValidationReport {
    let mut errors = Vec::new();

    let latitude = coordinate_in_range(&candidate.latitude, MIN_LATITUDE, MAX_LATITUDE);
    if latitude.is_none() {
        errors.push(INVALID_LATITUDE.to_owned());
    }

    let longitude = coordinate_in_range(&candidate.longitude, MIN_LONGITUDE, MAX_LONGITUDE);
    if longitude.is_none() {
        errors.push(INVALID_LONGITUDE.to_owned());
    }

    let address = candidate
        .address
        .as_str()
        .map(str::trim)
        .filter(|address| !address.is_empty());
    if address.is_none() {
        errors.push(INVALID_ADDRESS.to_owned());
    }

    let valid = match (latitude, longitude, address) {
        (Some(latitude), Some(longitude), Some(address)) => {
            Some(ValidLocation::new(latitude, longitude, address.to_owned()))
        }
        _ => None,
    };

    ValidationReport { errors, valid }
}

fn coordinate_in_range(value: &Value, min: f64, max: f64) -> Option<f64> {
    value
        .as_f64()
        .filter(|coordinate| coordinate.is_finite() && (min..=max).contains(coordinate))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::location::NewLocation;

    fn candidate(value: Value) -> LocationCandidate {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_location_passes() {
        let report = validate(&NewLocation::new(-33.8688, 151.2093, "Sydney").into());
        assert!(report.is_valid());
        assert!(report.errors.is_empty());

        let valid = report.into_result().unwrap();
        assert!((valid.latitude() - -33.8688).abs() < f64::EPSILON);
        assert!((valid.longitude() - 151.2093).abs() < f64::EPSILON);
        assert_eq!(valid.address(), "Sydney");
    }

    #[test]
    fn test_every_violation_is_reported() {
        let report = validate(&NewLocation::new(91.0, -200.0, "").into());
        assert!(!report.is_valid());
        assert_eq!(
            report.errors,
            vec![INVALID_LATITUDE, INVALID_LONGITUDE, INVALID_ADDRESS]
        );
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        assert!(validate(&NewLocation::new(90.0, 180.0, "North pole-ish").into()).is_valid());
        assert!(validate(&NewLocation::new(-90.0, -180.0, "South pole-ish").into()).is_valid());
        assert!(!validate(&NewLocation::new(90.000_001, 0.0, "x").into()).is_valid());
        assert!(!validate(&NewLocation::new(0.0, -180.000_001, "x").into()).is_valid());
    }

    #[test]
    fn test_zero_coordinates_are_valid() {
        let report = validate(&NewLocation::new(0.0, 0.0, "Null Island").into());
        assert!(report.is_valid());
    }

    #[test]
    fn test_address_is_trimmed() {
        let report = validate(&NewLocation::new(1.0, 2.0, "  10 Downing St \n").into());
        assert_eq!(report.into_result().unwrap().address(), "10 Downing St");
    }

    #[test]
    fn test_whitespace_only_address_is_rejected() {
        let report = validate(&NewLocation::new(1.0, 2.0, "   ").into());
        assert_eq!(report.errors, vec![INVALID_ADDRESS]);
    }

    #[test]
    fn test_non_numeric_coordinates_are_rejected() {
        let report = validate(&candidate(json!({
            "latitude": "45",
            "longitude": null,
            "address": "Somewhere"
        })));
        assert_eq!(report.errors, vec![INVALID_LATITUDE, INVALID_LONGITUDE]);
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        let report = validate(&candidate(json!({})));
        assert_eq!(report.errors.len(), 3);
        assert!(report.into_result().is_err());
    }

    #[test]
    fn test_non_string_address_is_rejected() {
        let report = validate(&candidate(json!({
            "latitude": 10,
            "longitude": 20,
            "address": ["not", "a", "string"]
        })));
        assert_eq!(report.errors, vec![INVALID_ADDRESS]);
    }

    #[test]
    fn test_integer_coordinates_are_accepted() {
        let report = validate(&candidate(json!({
            "latitude": 10,
            "longitude": -20,
            "address": "Integer Street"
        })));
        assert!(report.is_valid());
    }
}
