//! Cart repository for database operations.
//!
//! A user has at most one open cart (enforced by the UNIQUE constraint on
//! `carts.user_id`). Quantities for a product already in the cart accumulate
//! instead of creating duplicate lines.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use tradepost_core::{CartId, ProductId, UserId};

use super::RepositoryError;
use crate::models::{Cart, CartItem};

#[derive(sqlx::FromRow)]
struct CartRow {
    id: CartId,
    user_id: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Merge a batch of items into the user's cart.
    ///
    /// The cart is created on first use. Every line is applied inside one
    /// transaction, so concurrent batches interleave without losing
    /// quantity: the per-line upsert adds to whatever is already stored.
    ///
    /// Callers are expected to have validated the product IDs; the batch is
    /// applied as a whole or not at all.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails (for
    /// example a foreign key violation on an unknown product).
    pub async fn add_items(
        &self,
        user_id: UserId,
        items: &[(ProductId, i64)],
    ) -> Result<Cart, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO carts (user_id, created_at, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT (user_id) DO NOTHING
            ",
        )
        .bind(user_id)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let cart = sqlx::query_as::<_, CartRow>(
            r"
            SELECT id, user_id, created_at, updated_at
            FROM carts
            WHERE user_id = ?
            ",
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        for (product_id, quantity) in items {
            sqlx::query(
                r"
                INSERT INTO cart_items (cart_id, product_id, quantity)
                VALUES (?, ?, ?)
                ON CONFLICT (cart_id, product_id)
                DO UPDATE SET quantity = quantity + excluded.quantity
                ",
            )
            .bind(cart.id)
            .bind(product_id)
            .bind(quantity)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("UPDATE carts SET updated_at = ? WHERE id = ?")
            .bind(now)
            .bind(cart.id)
            .execute(&mut *tx)
            .await?;

        let items = sqlx::query_as::<_, CartItem>(
            r"
            SELECT product_id, quantity
            FROM cart_items
            WHERE cart_id = ?
            ORDER BY rowid
            ",
        )
        .bind(cart.id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Cart {
            id: cart.id,
            user_id: cart.user_id,
            items,
            created_at: cart.created_at,
            updated_at: now,
        })
    }

    /// List the items of a cart, in first-insertion order.
    ///
    /// Returns an empty list when the cart doesn't exist or belongs to a
    /// different user; callers cannot read someone else's cart through a
    /// guessed ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items(
        &self,
        cart_id: CartId,
        user_id: UserId,
    ) -> Result<Vec<CartItem>, RepositoryError> {
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
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Drop a cart and all of its items.
    ///
    /// A no-op when the cart doesn't exist or belongs to a different user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn clear(&self, cart_id: CartId, user_id: UserId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM carts WHERE id = ? AND user_id = ?")
            .bind(cart_id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
