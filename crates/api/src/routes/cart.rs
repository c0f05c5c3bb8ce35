//! Cart and order route handlers.
//!
//! The add response reports the merged cart as a `product_id -> quantity`
//! map; the view and order responses report items as a list in
//! first-insertion order.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use tradepost_core::{CartId, OrderId, ProductId, UserId};

use crate::error::Result;
use crate::models::{Cart, CartItem, Order};
use crate::routes::MessageResponse;
use crate::services::CheckoutService;
use crate::state::AppState;

/// Request body for adding items to the cart.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub user_id: UserId,
    pub items: Vec<CartItem>,
}

/// The merged cart after an add.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub cart_id: CartId,
    pub user_id: UserId,
    pub items: BTreeMap<ProductId, i64>,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        let items = cart
            .items
            .iter()
            .map(|item| (item.product_id, item.quantity))
            .collect();

        Self {
            cart_id: cart.id,
            user_id: cart.user_id,
            items,
        }
    }
}

/// Query parameters identifying a cart.
#[derive(Debug, Deserialize)]
pub struct CartQuery {
    pub user_id: UserId,
    pub cart_id: CartId,
}

/// Request body for ordering or discarding a cart.
#[derive(Debug, Deserialize)]
pub struct CartActionRequest {
    pub user_id: UserId,
    pub cart_id: CartId,
}

/// A placed order.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub products: Vec<CartItem>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.id,
            user_id: order.user_id,
            created_at: order.created_at,
            products: order.products,
        }
    }
}

/// Query parameters for order history.
#[derive(Debug, Deserialize)]
pub struct OrderHistoryQuery {
    pub user_id: UserId,
}

/// Merge a batch of items into the user's cart.
#[instrument(skip(state, req))]
pub async fn add(
    State(state): State<AppState>,
    Json(req): Json<AddToCartRequest>,
) -> Result<(StatusCode, Json<CartResponse>)> {
    let checkout = CheckoutService::new(state.pool());
    let cart = checkout.add_to_cart(req.user_id, &req.items).await?;

    Ok((StatusCode::CREATED, Json(cart.into())))
}

/// List the items of a cart.
#[instrument(skip(state))]
pub async fn view(
    State(state): State<AppState>,
    Query(query): Query<CartQuery>,
) -> Result<Json<Vec<CartItem>>> {
    let checkout = CheckoutService::new(state.pool());
    let items = checkout.view_cart(query.user_id, query.cart_id).await?;

    Ok(Json(items))
}

/// Place an order from a cart.
#[instrument(skip(state, req))]
pub async fn order(
    State(state): State<AppState>,
    Json(req): Json<CartActionRequest>,
) -> Result<(StatusCode, Json<OrderResponse>)> {
    let checkout = CheckoutService::new(state.pool());
    let placed = checkout.place_order(req.user_id, req.cart_id).await?;

    Ok((StatusCode::CREATED, Json(placed.into())))
}

/// Throw a cart away without ordering.
#[instrument(skip(state, req))]
pub async fn clean(
    State(state): State<AppState>,
    Json(req): Json<CartActionRequest>,
) -> Result<Json<MessageResponse>> {
    let checkout = CheckoutService::new(state.pool());
    checkout.clean_cart(req.user_id, req.cart_id).await?;

    Ok(Json(MessageResponse {
        message: "Cart cleaned".to_string(),
    }))
}

/// List the user's placed orders.
#[instrument(skip(state))]
pub async fn order_history(
    State(state): State<AppState>,
    Query(query): Query<OrderHistoryQuery>,
) -> Result<Json<Vec<OrderResponse>>> {
    let checkout = CheckoutService::new(state.pool());
    let orders = checkout.order_history(query.user_id).await?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}
