//! Seed the database with sample locations.
//!
//! Pins go through the same validation as API writes, so a bad sample fails
//! loudly instead of landing in storage.

use serde_json::json;
use tracing::info;

use pinmap_core::LocationCandidate;
use pinmap_server::services::LocationService;
use pinmap_server::{ServerConfig, db};

/// `(latitude, longitude, address)` of each sample pin.
const SAMPLE_LOCATIONS: &[(f64, f64, &str)] = &[
    (-33.8568, 151.2153, "Sydney Opera House, Bennelong Point NSW 2000"),
    (-33.8523, 151.2108, "Sydney Harbour Bridge, NSW"),
    (-33.8915, 151.2767, "Bondi Beach, NSW 2026"),
    (-33.8688, 151.2093, "Sydney NSW 2000"),
    (-37.8136, 144.9631, "Melbourne VIC 3000"),
];

/// Insert the sample pins, migrating first so a fresh database works.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a sample is rejected.
pub async fn sample_locations() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;

    let service = LocationService::new(&pool);
    for &(latitude, longitude, address) in SAMPLE_LOCATIONS {
        let candidate = LocationCandidate {
            latitude: json!(latitude),
            longitude: json!(longitude),
            address: json!(address),
        };
        let location = service.create(&candidate).await?;
        info!(location_id = %location.id, address, "Seeded location");
    }

    info!(count = SAMPLE_LOCATIONS.len(), "Seeding complete");
    pool.close().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pinmap_core::{NewLocation, validate};

    use super::*;

    #[test]
    fn test_samples_are_valid() {
        for &(latitude, longitude, address) in SAMPLE_LOCATIONS {
            let candidate = LocationCandidate::from(NewLocation::new(latitude, longitude, address));
            assert!(validate(&candidate).is_valid(), "{address} should be valid");
        }
    }
}
