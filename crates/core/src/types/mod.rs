//! Core types for Pinmap.
//!
//! This module provides type-safe wrappers for the location domain.

pub mod envelope;
pub mod id;
pub mod location;
pub mod params;

pub use envelope::Envelope;
pub use id::*;
pub use location::{
    Location, LocationCandidate, MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE,
    NewLocation, ValidLocation,
};
pub use params::{
    DEFAULT_RECENT_LIMIT, InvalidIdError, normalize_limit, parse_limit, parse_location_id,
};
