//! Parsing of externally supplied path and query parameters.
//!
//! Raw strings from URLs are turned into typed values here, before anything
//! reaches the service or storage layers.

use thiserror::Error;

use super::id::LocationId;

/// Number of rows returned by "recent" listings when no usable limit is given.
pub const DEFAULT_RECENT_LIMIT: u32 = 10;

/// A location ID string that is not an integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid location id: {raw:?}")]
pub struct InvalidIdError {
    /// The rejected input.
    pub raw: String,
}

/// Parse a location ID from a path segment.
///
/// Surrounding whitespace is ignored; anything else that is not a base-10
/// integer is rejected.
///
/// # Errors
///
/// Returns [`InvalidIdError`] if `raw` is not an integer.
///
/// # Example
///
/// ```
/// use pinmap_core::{LocationId, parse_location_id};
///
/// assert_eq!(parse_location_id("42").unwrap(), LocationId::new(42));
/// assert!(parse_location_id("abc").is_err());
/// ```
pub fn parse_location_id(raw: &str) -> Result<LocationId, InvalidIdError> {
    raw.trim()
        .parse::<i64>()
        .map(LocationId::new)
        .map_err(|_| InvalidIdError {
            raw: raw.to_owned(),
        })
}

/// Parse a "recent" row limit from an optional query parameter.
///
/// Absent, non-numeric, and non-positive values fall back to
/// [`DEFAULT_RECENT_LIMIT`].
#[must_use]
pub fn parse_limit(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .map_or(DEFAULT_RECENT_LIMIT, normalize_limit)
}

/// Clamp an arbitrary limit into a usable positive row count.
#[must_use]
pub fn normalize_limit(limit: i64) -> u32 {
    if limit <= 0 {
        return DEFAULT_RECENT_LIMIT;
    }
    u32::try_from(limit).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_location_id_accepts_integers() {
        assert_eq!(parse_location_id("7"), Ok(LocationId::new(7)));
        assert_eq!(parse_location_id(" 12 "), Ok(LocationId::new(12)));
        assert_eq!(parse_location_id("-3"), Ok(LocationId::new(-3)));
    }

    #[test]
    fn test_parse_location_id_rejects_non_integers() {
        for raw in ["", "abc", "12abc", "1.5", "0x10"] {
            let err = parse_location_id(raw).unwrap_err();
            assert_eq!(err.raw, raw);
        }
    }

    #[test]
    fn test_parse_limit_defaults() {
        assert_eq!(parse_limit(None), DEFAULT_RECENT_LIMIT);
        assert_eq!(parse_limit(Some("")), DEFAULT_RECENT_LIMIT);
        assert_eq!(parse_limit(Some("lots")), DEFAULT_RECENT_LIMIT);
        assert_eq!(parse_limit(Some("0")), DEFAULT_RECENT_LIMIT);
        assert_eq!(parse_limit(Some("-4")), DEFAULT_RECENT_LIMIT);
    }

    #[test]
    fn test_parse_limit_accepts_positive_integers() {
        assert_eq!(parse_limit(Some("3")), 3);
        assert_eq!(parse_limit(Some("25")), 25);
    }

    #[test]
    fn test_normalize_limit_saturates() {
        assert_eq!(normalize_limit(i64::MAX), u32::MAX);
        assert_eq!(normalize_limit(1), 1);
    }
}
