//! Checkout service: the cart and order workflow.
//!
//! A cart goes through three states. It doesn't exist until the first add;
//! it is open while items accumulate; placing an order consumes it. The
//! next add after checkout starts a fresh cart.
//!
//! Adding items validates the whole batch up front. One bad product ID or
//! quantity rejects the batch and the cart keeps its previous contents.

mod error;

pub use error::CheckoutError;

use chrono::Utc;
use sqlx::SqlitePool;

use tradepost_core::{CartId, UserId};

use crate::db::carts::CartRepository;
use crate::db::orders::OrderRepository;
use crate::db::products::ProductRepository;
use crate::db::users::UserRepository;
use crate::models::{Cart, CartItem, Order};

/// Checkout service.
pub struct CheckoutService<'a> {
    users: UserRepository<'a>,
    products: ProductRepository<'a>,
    carts: CartRepository<'a>,
    orders: OrderRepository<'a>,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
            products: ProductRepository::new(pool),
            carts: CartRepository::new(pool),
            orders: OrderRepository::new(pool),
        }
    }

    /// Add a batch of items to the user's cart, creating it if needed.
    ///
    /// Quantities for products already in the cart accumulate. The batch is
    /// validated in full before anything is written: every quantity must be
    /// positive and every product must exist.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::UserNotFound` if the user doesn't exist.
    /// Returns `CheckoutError::EmptyBatch` if the batch has no items.
    /// Returns `CheckoutError::InvalidQuantity` for a zero or negative quantity.
    /// Returns `CheckoutError::ProductNotFound` for an unknown product.
    pub async fn add_to_cart(
        &self,
        user_id: UserId,
        items: &[CartItem],
    ) -> Result<Cart, CheckoutError> {
        self.require_user(user_id).await?;

        if items.is_empty() {
            return Err(CheckoutError::EmptyBatch);
        }

        for item in items {
            if item.quantity < 1 {
                return Err(CheckoutError::InvalidQuantity {
                    product_id: item.product_id,
                    quantity: item.quantity,
                });
            }
        }

        for item in items {
            if !self.products.exists(item.product_id).await? {
                return Err(CheckoutError::ProductNotFound(item.product_id));
            }
        }

        let pairs: Vec<_> = items.iter().map(|i| (i.product_id, i.quantity)).collect();
        let cart = self.carts.add_items(user_id, &pairs).await?;

        tracing::info!(
            user_id = %user_id,
            cart_id = %cart.id,
            lines = cart.items.len(),
            "items added to cart"
        );
        Ok(cart)
    }

    /// List the items of the user's cart.
    ///
    /// An unknown or foreign `cart_id` yields an empty list, the same as a
    /// cart that was never filled.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::UserNotFound` if the user doesn't exist.
    pub async fn view_cart(
        &self,
        user_id: UserId,
        cart_id: CartId,
    ) -> Result<Vec<CartItem>, CheckoutError> {
        self.require_user(user_id).await?;

        Ok(self.carts.items(cart_id, user_id).await?)
    }

    /// Place an order from the cart.
    ///
    /// The cart's items become the order's immutable snapshot and the cart
    /// is consumed, both in one step. Ordering twice from the same cart
    /// fails the second time because the cart is already gone.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::UserNotFound` if the user doesn't exist.
    /// Returns `CheckoutError::EmptyCart` if the cart is empty, missing, or
    /// belongs to someone else.
    pub async fn place_order(
        &self,
        user_id: UserId,
        cart_id: CartId,
    ) -> Result<Order, CheckoutError> {
        self.require_user(user_id).await?;

        let order = self
            .orders
            .create_from_cart(cart_id, user_id, Utc::now())
            .await?
            .ok_or(CheckoutError::EmptyCart)?;

        tracing::info!(
            user_id = %user_id,
            order_id = %order.id,
            lines = order.products.len(),
            "order placed"
        );
        Ok(order)
    }

    /// Throw away the cart without ordering.
    ///
    /// Succeeds even when the cart is already gone.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::UserNotFound` if the user doesn't exist.
    pub async fn clean_cart(&self, user_id: UserId, cart_id: CartId) -> Result<(), CheckoutError> {
        self.require_user(user_id).await?;

        self.carts.clear(cart_id, user_id).await?;
        Ok(())
    }

    /// List the user's placed orders, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::UserNotFound` if the user doesn't exist.
    pub async fn order_history(&self, user_id: UserId) -> Result<Vec<Order>, CheckoutError> {
        self.require_user(user_id).await?;

        Ok(self.orders.list_for_user(user_id).await?)
    }

    async fn require_user(&self, user_id: UserId) -> Result<(), CheckoutError> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(CheckoutError::UserNotFound)?;
        Ok(())
    }
}
