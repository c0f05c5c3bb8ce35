//! Checkout error types.

use thiserror::Error;

use tradepost_core::ProductId;

use crate::db::RepositoryError;

/// Errors that can occur during cart and order operations.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The acting user does not exist.
    #[error("user not found")]
    UserNotFound,

    /// A product in the batch does not exist.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// A quantity in the batch is zero or negative.
    #[error("quantity must be at least 1 for product {product_id}, got {quantity}")]
    InvalidQuantity { product_id: ProductId, quantity: i64 },

    /// The batch of items to add was empty.
    #[error("items cannot be empty")]
    EmptyBatch,

    /// Ordering an empty, missing, or foreign cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
