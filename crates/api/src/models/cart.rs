//! Cart models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tradepost_core::{CartId, ProductId, UserId};

/// One product line in a cart or in an order snapshot.
///
/// This type doubles as the wire format for cart item lists and as the
/// persisted order snapshot, so the serialized field names are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CartItem {
    pub product_id: ProductId,
    #[serde(rename = "product_quantity")]
    pub quantity: i64,
}

/// A user's open cart with its merged item lines.
///
/// Items are ordered by first insertion; merging more quantity into an
/// existing line does not move it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub id: CartId,
    pub user_id: UserId,
    pub items: Vec<CartItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
