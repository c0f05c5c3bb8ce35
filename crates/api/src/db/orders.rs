//! Order repository for database operations.
//!
//! Orders carry a JSON snapshot of the cart taken at checkout. The snapshot
//! is immutable; catalog edits after the fact never change a placed order.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use tradepost_core::{CartId, OrderId, UserId};

use super::RepositoryError;
use crate::models::{CartItem, Order};

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    user_id: UserId,
    created_at: DateTime<Utc>,
    products: String,
}

impl OrderRow {
    fn into_order(self) -> Result<Order, RepositoryError> {
        let products: Vec<CartItem> = serde_json::from_str(&self.products).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid order snapshot in database: {e}"))
        })?;

        Ok(Order {
            id: self.id,
            user_id: self.user_id,
            created_at: self.created_at,
            products,
        })
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Turn a cart into an order, atomically.
    ///
    /// Reads the cart's items, writes the order snapshot, and drops the
    /// cart, all inside one transaction. Either the order exists and the
    /// cart is gone, or neither happened.
    ///
    /// Returns `None` when the cart has no items for this user (missing,
    /// foreign, or empty); nothing is written in that case.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    /// Returns `RepositoryError::DataCorruption` if the snapshot cannot be
    /// serialized or read back.
    pub async fn create_from_cart(
        &self,
        cart_id: CartId,
        user_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Result<Option<Order>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let items = sqlx::query_as::<_, CartItem>(
            r"
            SELECT ci.product_id, ci.quantity
            FROM cart_items ci
            JOIN carts c ON c.id = ci.cart_id
            WHERE ci.cart_id = ? AND c.user_id = ?
            ORDER BY ci.rowid
            ",
        )
        .bind(cart_id)
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await?;

        if items.is_empty() {
            return Ok(None);
        }

        let snapshot = serde_json::to_string(&items).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize order snapshot: {e}"))
        })?;

        let row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO orders (user_id, created_at, products)
            VALUES (?, ?, ?)
            RETURNING id, user_id, created_at, products
            ",
        )
        .bind(user_id)
        .bind(created_at)
        .bind(&snapshot)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM carts WHERE id = ? AND user_id = ?")
            .bind(cart_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        row.into_order().map(Some)
    }

    /// List a user's orders, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored snapshot is
    /// invalid.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, created_at, products
            FROM orders
            WHERE user_id = ?
            ORDER BY id
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(OrderRow::into_order).collect()
    }
}
