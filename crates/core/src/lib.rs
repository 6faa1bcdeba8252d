//! Pinmap Core - Shared types library.
//!
//! This crate provides the types shared by every Pinmap component:
//! - `server` - REST API and persistence for map pins
//! - `client` - Reactive location store driven by the REST API
//! - `cli` - Command-line tools for migrations and pin management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! on both sides of the API.
//!
//! # Modules
//!
//! - [`types`] - Location records, IDs, parameter parsing, response envelope
//! - [`validation`] - Coordinate and address rules for proposed locations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod validation;

pub use types::*;
pub use validation::{ValidationReport, validate};
