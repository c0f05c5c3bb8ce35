//! Catalog error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The acting user is not an admin.
    #[error("only admins can manage products")]
    Unauthorized,

    /// The acting user does not exist.
    #[error("user not found")]
    UserNotFound,

    /// Product not found.
    #[error("product not found")]
    ProductNotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
