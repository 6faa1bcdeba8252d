//! Pinmap CLI - Database migrations and location management.
//!
//! # Usage
//!
//! ```bash
//! # Create the locations table
//! pinmap migrate
//!
//! # Insert a few sample pins
//! pinmap seed
//!
//! # Talk to a running server
//! pinmap locations list
//! pinmap locations recent --limit 5
//! pinmap locations add --lat -33.8688 --lon 151.2093 --address "Sydney"
//! pinmap locations delete 1
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run embedded database migrations
//! - `seed` - Insert sample locations directly into the database
//! - `locations` - Manage locations through the HTTP API

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "pinmap")]
#[command(author, version, about = "Pinmap CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert sample locations
    Seed,
    /// Manage locations through a running server
    Locations {
        #[command(subcommand)]
        action: LocationAction,
    },
}

#[derive(Subcommand)]
enum LocationAction {
    /// List every location, newest first
    List,
    /// List the newest locations
    Recent {
        /// Maximum number of locations
        #[arg(short, long, default_value_t = 10)]
        limit: u32,
    },
    /// Show one location
    Show {
        /// Location ID
        id: String,
    },
    /// Create a location
    Add {
        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Street address or place name
        #[arg(short, long)]
        address: String,
    },
    /// Delete a location
    Delete {
        /// Location ID
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::sample_locations().await?,
        Commands::Locations { action } => {
            let store = commands::locations::connect()?;
            match action {
                LocationAction::List => commands::locations::list(&store).await?,
                LocationAction::Recent { limit } => {
                    commands::locations::recent(&store, limit).await?;
                }
                LocationAction::Show { id } => commands::locations::show(&store, &id).await?,
                LocationAction::Add { lat, lon, address } => {
                    commands::locations::add(&store, lat, lon, address).await?;
                }
                LocationAction::Delete { id } => {
                    commands::locations::delete(&store, &id).await?;
                }
            }
        }
    }
    Ok(())
}
