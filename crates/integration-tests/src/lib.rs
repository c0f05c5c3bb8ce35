//! Integration tests for Tradepost.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tradepost-integration-tests
//! ```
//!
//! Each test boots the full API router on an ephemeral port with its own
//! in-memory `SQLite` database, so no external services or setup steps are
//! required.
//!
//! # Test Categories
//!
//! - `auth` - Registration and login tests
//! - `catalog` - Product management and authorization tests
//! - `shopping` - Cart and order journey tests
//! - `health` - Liveness and readiness checks

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::str::FromStr;

use reqwest::Client;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tradepost_api::config::ApiConfig;
use tradepost_api::state::AppState;
use tradepost_api::{db, routes};

/// A running API server backed by a fresh in-memory database.
///
/// Dropping the context leaves the server task running until the test
/// process exits, which is fine for test lifetimes.
pub struct TestContext {
    /// HTTP client for talking to the server.
    pub client: Client,
    /// Base URL of the server, e.g. `http://127.0.0.1:49152`.
    pub base_url: String,
}

impl TestContext {
    /// Start a fresh server with migrations applied.
    ///
    /// # Panics
    ///
    /// Panics if the database cannot be created or the listener cannot
    /// bind, since a test cannot proceed without either.
    pub async fn new() -> Self {
        let pool = memory_pool().await;
        db::MIGRATOR
            .run(&pool)
            .await
            .expect("migrations apply cleanly");

        let config = ApiConfig {
            database_url: "sqlite::memory:".to_string(),
            host: "127.0.0.1".parse().expect("valid address"),
            port: 0,
        };
        let app = routes::routes()
            .with_state(AppState::new(config, pool));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind an ephemeral port");
        let addr = listener.local_addr().expect("listener has an address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("server runs until the test process exits");
        });

        Self {
            client: Client::new(),
            base_url: format!("http://{addr}"),
        }
    }

    /// Build a full URL for a request path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// An in-memory database restricted to a single connection.
///
/// Every pooled connection to `sqlite::memory:` gets its own private
/// database, so the pool must never hand out a second one.
async fn memory_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid connection string")
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("connect to in-memory database")
}
