//! Integration tests for Pinmap.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pinmap-integration-tests
//! ```
//!
//! Each test spawns its own server on `127.0.0.1:0` backed by an in-memory
//! `SQLite` database, so tests are isolated and need no external services.
//!
//! # Test Categories
//!
//! - `locations_api` - Raw HTTP status codes and envelopes
//! - `location_store` - The client store driving a real server

use std::net::SocketAddr;

use axum::ServiceExt;
use axum::extract::Request;
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use pinmap_client::{ClientConfig, HttpLocationApi, LocationStore};
use pinmap_server::routes::with_normalized_paths;
use pinmap_server::{AppState, ServerConfig, app, db};

/// Error type for test setup.
pub type SetupError = Box<dyn std::error::Error + Send + Sync>;

/// A running server with its own database.
///
/// The server task is aborted when this value is dropped.
pub struct TestServer {
    pub addr: SocketAddr,
    pub pool: SqlitePool,
    task: JoinHandle<()>,
}

impl TestServer {
    /// Start a server on an ephemeral port.
    ///
    /// # Errors
    ///
    /// Returns an error if the database or listener cannot be set up.
    pub async fn spawn() -> Result<Self, SetupError> {
        let config = ServerConfig::from_source(|key| match key {
            "PINMAP_DATABASE_URL" => Some("sqlite::memory:".to_owned()),
            "PINMAP_PORT" => Some("0".to_owned()),
            _ => None,
        })?;

        let pool = db::create_pool(&config.database_url).await?;
        db::run_migrations(&pool).await?;

        let listener = TcpListener::bind(config.socket_addr()).await?;
        let addr = listener.local_addr()?;
        // Same path handling as the `pinmap-server` binary
        let service = with_normalized_paths(app(AppState::new(pool.clone())));

        let task = tokio::spawn(async move {
            let make_service = ServiceExt::<Request>::into_make_service(service);
            let _ = axum::serve(listener, make_service).await;
        });

        Ok(Self { addr, pool, task })
    }

    /// API base, e.g. `http://127.0.0.1:54321/api`.
    #[must_use]
    pub fn api_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Absolute URL for a server path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// A fresh client store pointed at this server.
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL cannot be parsed.
    pub fn store(&self) -> Result<LocationStore<HttpLocationApi>, SetupError> {
        let config = ClientConfig::new(&self.api_url())?;
        Ok(LocationStore::new(HttpLocationApi::new(&config)?))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
