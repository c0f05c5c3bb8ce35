//! Admin user management commands.
//!
//! # Usage
//!
//! ```bash
//! tp-cli admin create -u alice -p "a strong password"
//! ```
//!
//! # Environment Variables
//!
//! - `TRADEPOST_DATABASE_URL` - `SQLite` connection string
//!   (default: `sqlite:tradepost.db`)
//!
//! Migrations are applied before the insert, so this command also works
//! against a database file that doesn't exist yet.

use thiserror::Error;

use tradepost_core::Role;

use tradepost_api::config::{ApiConfig, ConfigError};
use tradepost_api::db;
use tradepost_api::services::{AuthError, AuthService};

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// User already exists.
    #[error("User already exists with username: {0}")]
    UserExists(String),

    /// Registration failed (bad username or password, or a database error).
    #[error("Registration error: {0}")]
    Auth(AuthError),
}

/// Create a new admin user.
///
/// # Arguments
///
/// * `username` - Admin's username
/// * `password` - Admin's password, hashed with Argon2id before storage
///
/// # Returns
///
/// The ID of the created admin user.
///
/// # Errors
///
/// Returns `AdminError` if the user already exists, the input is invalid,
/// or the database cannot be reached.
pub async fn create_user(username: &str, password: &str) -> Result<i64, AdminError> {
    let config = ApiConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;
    db::MIGRATOR.run(&pool).await?;

    tracing::info!("Creating admin user: {}", username);

    let auth = AuthService::new(&pool);
    let user = auth
        .register(username, password, Role::Admin)
        .await
        .map_err(|e| match e {
            AuthError::UserAlreadyExists => AdminError::UserExists(username.to_owned()),
            other => AdminError::Auth(other),
        })?;

    tracing::info!(
        "Admin user created successfully! ID: {}, Username: {}",
        user.id,
        user.username
    );

    Ok(user.id.as_i64())
}
