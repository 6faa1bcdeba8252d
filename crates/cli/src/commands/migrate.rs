//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! pinmap migrate
//! ```
//!
//! # Environment Variables
//!
//! - `PINMAP_DATABASE_URL` - `SQLite` connection string (falls back to
//!   `DATABASE_URL`, then `sqlite://database/locationaddress.db`)
//!
//! Migrations are embedded from `crates/server/migrations/`.

use tracing::info;

use pinmap_server::{ServerConfig, db};

/// Apply pending migrations to the configured database.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the database cannot be
/// opened, or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;

    info!("Running migrations...");
    db::run_migrations(&pool).await?;

    pool.close().await;
    info!("Migrations complete!");
    Ok(())
}
