//! Pinmap client.
//!
//! A [`LocationStore`] holds the client-side projection of the location set
//! (list, selection, loading and error flags, map viewport) and drives a
//! [`LocationApi`] to change it. [`HttpLocationApi`] talks to a Pinmap
//! server over HTTP.
//!
//! The store never changes `locations` optimistically: a record only appears
//! or disappears after the server acknowledges the write.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod store;

pub use api::{HttpLocationApi, LocationApi};
pub use config::ClientConfig;
pub use error::ClientError;
pub use store::{LocationStore, StoreState, Viewport};
