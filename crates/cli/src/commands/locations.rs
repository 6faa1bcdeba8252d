//! Location management through a running server.
//!
//! Each invocation builds a fresh [`LocationStore`] over HTTP and prints the
//! affected records as JSON.

use pinmap_client::{ClientConfig, HttpLocationApi, LocationStore};
use pinmap_core::{NewLocation, parse_location_id};
use serde::Serialize;
use tracing::info;

pub type Store = LocationStore<HttpLocationApi>;

/// Build a store for the API at `PINMAP_API_URL`.
///
/// # Errors
///
/// Returns an error if the configured URL is invalid.
pub fn connect() -> Result<Store, Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    info!(api_url = %config.api_url, "Using locations API");
    Ok(LocationStore::new(HttpLocationApi::new(&config)?))
}

/// Print every location.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn list(store: &Store) -> Result<(), Box<dyn std::error::Error>> {
    store.fetch_locations().await?;
    print_json(&store.locations())
}

/// Print the newest `limit` locations.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn recent(store: &Store, limit: u32) -> Result<(), Box<dyn std::error::Error>> {
    let locations = store.fetch_recent(limit).await?;
    print_json(&locations)
}

/// Print one location.
///
/// # Errors
///
/// Returns an error if `id` is not numeric or the request fails.
pub async fn show(store: &Store, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let location = store.fetch_location(parse_location_id(id)?).await?;
    print_json(&location)
}

/// Create a location and print the stored record.
///
/// # Errors
///
/// Returns an error if the server rejects the location or the request fails.
pub async fn add(
    store: &Store,
    latitude: f64,
    longitude: f64,
    address: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = store
        .add_location(NewLocation::new(latitude, longitude, address))
        .await;

    match result {
        Ok(location) => print_json(&location),
        Err(err) => {
            for message in err.validation_errors() {
                tracing::error!("  - {message}");
            }
            Err(err.into())
        }
    }
}

/// Delete a location.
///
/// # Errors
///
/// Returns an error if `id` is not numeric or the request fails.
pub async fn delete(store: &Store, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let id = parse_location_id(id)?;
    store.delete_location(id).await?;
    info!(location_id = %id, "Location deleted");
    Ok(())
}

fn print_json(value: &impl Serialize) -> Result<(), Box<dyn std::error::Error>> {
    let output = serde_json::to_string_pretty(value)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{output}");
    }
    Ok(())
}
