//! Order model.

use chrono::{DateTime, Utc};
use tradepost_core::{OrderId, UserId};

use super::CartItem;

/// A placed order.
///
/// `products` is the snapshot of the cart taken at checkout; later catalog
/// edits or deletions do not affect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub products: Vec<CartItem>,
}
