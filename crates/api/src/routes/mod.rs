//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                - Liveness check
//! GET    /health/ready          - Readiness check (pings the database)
//!
//! # Users
//! POST   /users/register        - Register a new user
//! POST   /users/login           - Verify credentials
//!
//! # Products
//! GET    /products              - Product listing
//! GET    /products/{id}         - Product detail
//! POST   /products/add          - Add product (admin)
//! PUT    /products/edit/{id}    - Edit product (admin)
//! DELETE /products/delete/{id}  - Delete product (admin)
//!
//! # Cart
//! POST   /cart/add              - Merge a batch of items into the cart
//! GET    /cart/view             - List cart items (?user_id=&cart_id=)
//! POST   /cart/order            - Place an order from the cart
//! POST   /cart/clean            - Throw the cart away
//!
//! # Orders
//! GET    /orders                - Order history (?user_id=)
//! ```

pub mod cart;
pub mod products;
pub mod users;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, post, put},
};
use serde::Serialize;

use crate::state::AppState;

/// JSON body for confirmation-only responses.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
        .route("/add", post(products::add))
        .route("/edit/{id}", put(products::edit))
        .route("/delete/{id}", delete(products::remove))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/view", get(cart::view))
        .route("/order", post(cart::order))
        .route("/clean", post(cart::clean))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new().route("/", get(cart::order_history))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health checks
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        // User routes
        .nest("/users", user_routes())
        // Product routes
        .nest("/products", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Order routes
        .nest("/orders", order_routes())
}

/// Liveness check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Readiness check endpoint; verifies the database is reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::error!("Readiness check failed: {e}");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
