//! CLI command implementations.

pub mod locations;
pub mod migrate;
pub mod seed;
