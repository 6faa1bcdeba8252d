//! Business logic services for the Pinmap server.
//!
//! # Services
//!
//! - `locations` - Validation and lifecycle of map pins

pub mod locations;

pub use locations::{LocationService, LocationServiceError};
