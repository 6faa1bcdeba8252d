//! Pinmap server library.
//!
//! This crate provides the location API as a library, allowing it to be
//! tested and embedded.
//!
//! # Layers
//!
//! - [`db`] - `SQLite` pool, migrations, and the location repository
//! - [`services`] - Validation and the location lifecycle
//! - [`routes`] - axum handlers and the application router
//! - [`error`] - Mapping of failures to HTTP responses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ServerConfig;
pub use routes::app;
pub use state::AppState;
