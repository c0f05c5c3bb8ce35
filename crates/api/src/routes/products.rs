//! Product catalog route handlers.
//!
//! Reads are public. Writes carry the acting user's ID in the request body
//! and are checked against the admin gate by the catalog service.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use tradepost_core::{ProductId, UserId};

use crate::error::Result;
use crate::models::{NewProduct, Product, ProductPatch};
use crate::routes::MessageResponse;
use crate::services::CatalogService;
use crate::state::AppState;

/// Request body for adding a product.
#[derive(Debug, Deserialize)]
pub struct AddProductRequest {
    pub user_id: UserId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
}

/// Request body for editing a product. Omitted fields keep their value.
#[derive(Debug, Deserialize)]
pub struct EditProductRequest {
    pub user_id: UserId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
}

/// Request body for deleting a product.
#[derive(Debug, Deserialize)]
pub struct DeleteProductRequest {
    pub user_id: UserId,
}

/// Public view of a catalog entry.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
        }
    }
}

/// List all products.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<ProductResponse>>> {
    let catalog = CatalogService::new(state.pool());
    let products = catalog.list_products().await?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// Show a single product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductResponse>> {
    let catalog = CatalogService::new(state.pool());
    let product = catalog.get_product(id).await?;

    Ok(Json(product.into()))
}

/// Add a product to the catalog.
#[instrument(skip(state, req))]
pub async fn add(
    State(state): State<AppState>,
    Json(req): Json<AddProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    let catalog = CatalogService::new(state.pool());
    let product = catalog
        .add_product(
            req.user_id,
            &NewProduct {
                name: req.name,
                description: req.description,
                price: req.price,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(product.into())))
}

/// Apply a partial update to a product.
#[instrument(skip(state, req))]
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(req): Json<EditProductRequest>,
) -> Result<Json<ProductResponse>> {
    let catalog = CatalogService::new(state.pool());
    let product = catalog
        .edit_product(
            req.user_id,
            id,
            &ProductPatch {
                name: req.name,
                description: req.description,
                price: req.price,
            },
        )
        .await?;

    Ok(Json(product.into()))
}

/// Delete a product from the catalog.
#[instrument(skip(state, req))]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(req): Json<DeleteProductRequest>,
) -> Result<Json<MessageResponse>> {
    let catalog = CatalogService::new(state.pool());
    catalog.remove_product(req.user_id, id).await?;

    Ok(Json(MessageResponse {
        message: "Product deleted".to_string(),
    }))
}
