//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional and fall back to development defaults:
//!
//! - `TRADEPOST_DATABASE_URL` - `SQLite` connection string
//!   (default: `sqlite:tradepost.db`; `DATABASE_URL` is honored as a fallback)
//! - `TRADEPOST_HOST` - Bind address (default: `127.0.0.1`)
//! - `TRADEPOST_PORT` - Listen port (default: `3000`)
//!
//! A `.env` file in the working directory is loaded first if present.

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `SQLite` connection string.
    pub database_url: String,
    /// Address the HTTP server binds to.
    pub host: IpAddr,
    /// Port the HTTP server listens on.
    pub port: u16,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the host or port cannot be
    /// parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore errors if it doesn't)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("TRADEPOST_DATABASE_URL", "sqlite:tradepost.db");

        let host = get_env_or_default("TRADEPOST_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("TRADEPOST_HOST".to_string(), e.to_string()))?;

        let port = get_env_or_default("TRADEPOST_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("TRADEPOST_PORT".to_string(), e.to_string()))?;

        Ok(Self {
            database_url,
            host,
            port,
        })
    }

    /// The socket address to bind the server to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get the database URL, preferring the service-specific variable over the
/// generic `DATABASE_URL`.
fn get_database_url(primary_key: &str, default: &str) -> String {
    if let Ok(value) = std::env::var(primary_key) {
        return value;
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return value;
    }
    default.to_string()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
