//! Database operations for the Tradepost `SQLite` store.
//!
//! # Tables
//!
//! - `users` - Account holders and their Argon2id password hashes
//! - `products` - The catalog (prices stored as exact decimal strings)
//! - `carts` / `cart_items` - At most one open cart per user
//! - `orders` - Placed orders with a JSON snapshot of the cart
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/`, embedded into the
//! binary via [`MIGRATOR`], and run on startup or via:
//! ```bash
//! cargo run -p tradepost-cli -- migrate
//! ```

pub mod carts;
pub mod orders;
pub mod products;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use carts::CartRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

/// Embedded migrations from `crates/api/migrations/`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// The database file is created if it does not exist, and foreign key
/// enforcement is switched on for every connection.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g. `sqlite:tradepost.db`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is malformed or the connection cannot
/// be established.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Migrated in-memory database for tests.
///
/// A single connection is mandatory: every pooled connection to
/// `sqlite::memory:` would otherwise get its own private database.
#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid connection string")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("connect to in-memory database");

    MIGRATOR.run(&pool).await.expect("run migrations");
    pool
}
