//! Catalog cleanup commands.
//!
//! # Usage
//!
//! ```bash
//! tp-cli clean-products
//! ```
//!
//! # Environment Variables
//!
//! - `TRADEPOST_DATABASE_URL` - `SQLite` connection string
//!   (default: `sqlite:tradepost.db`)

use thiserror::Error;

use tradepost_api::config::{ApiConfig, ConfigError};
use tradepost_api::db;
use tradepost_api::db::{ProductRepository, RepositoryError};

/// Errors that can occur during catalog cleanup.
#[derive(Debug, Error)]
pub enum CleanError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Delete every product from the catalog.
///
/// # Returns
///
/// The number of products removed.
///
/// # Errors
///
/// Returns `CleanError` if the database cannot be reached or the delete
/// fails.
pub async fn products() -> Result<u64, CleanError> {
    let config = ApiConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;

    tracing::info!("Deleting all products...");
    let removed = ProductRepository::new(&pool).delete_all().await?;

    tracing::info!("Removed {} products", removed);
    Ok(removed)
}
