//! Product catalog service.
//!
//! Reads are open to everyone; writes go through the admin gate. The acting
//! user is resolved fresh on every write, so a role change takes effect on
//! the next request.

mod error;

pub use error::CatalogError;

use sqlx::SqlitePool;

use tradepost_core::{ProductId, UserId};

use crate::db::RepositoryError;
use crate::db::products::ProductRepository;
use crate::db::users::UserRepository;
use crate::models::{NewProduct, Product, ProductPatch};

/// Product catalog service.
pub struct CatalogService<'a> {
    users: UserRepository<'a>,
    products: ProductRepository<'a>,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
            products: ProductRepository::new(pool),
        }
    }

    /// List all products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the database operation fails.
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.list().await?)
    }

    /// Get a single product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ProductNotFound` if the product doesn't exist.
    pub async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.products
            .get(id)
            .await?
            .ok_or(CatalogError::ProductNotFound)
    }

    /// Add a product to the catalog. Admins only.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UserNotFound` if the acting user doesn't exist.
    /// Returns `CatalogError::Unauthorized` if the acting user isn't an admin.
    pub async fn add_product(
        &self,
        acting_user: UserId,
        new: &NewProduct,
    ) -> Result<Product, CatalogError> {
        self.require_admin(acting_user).await?;

        let product = self.products.create(new).await?;
        tracing::info!(product_id = %product.id, "product added to catalog");
        Ok(product)
    }

    /// Apply a partial update to a product. Admins only.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UserNotFound` if the acting user doesn't exist.
    /// Returns `CatalogError::Unauthorized` if the acting user isn't an admin.
    /// Returns `CatalogError::ProductNotFound` if the product doesn't exist.
    pub async fn edit_product(
        &self,
        acting_user: UserId,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Product, CatalogError> {
        self.require_admin(acting_user).await?;

        self.products.update(id, patch).await.map_err(|e| match e {
            RepositoryError::NotFound => CatalogError::ProductNotFound,
            other => CatalogError::Repository(other),
        })
    }

    /// Remove a product from the catalog. Admins only.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UserNotFound` if the acting user doesn't exist.
    /// Returns `CatalogError::Unauthorized` if the acting user isn't an admin.
    /// Returns `CatalogError::ProductNotFound` if the product doesn't exist.
    pub async fn remove_product(
        &self,
        acting_user: UserId,
        id: ProductId,
    ) -> Result<(), CatalogError> {
        self.require_admin(acting_user).await?;

        self.products.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => CatalogError::ProductNotFound,
            other => CatalogError::Repository(other),
        })?;

        tracing::info!(product_id = %id, "product removed from catalog");
        Ok(())
    }

    async fn require_admin(&self, acting_user: UserId) -> Result<(), CatalogError> {
        let user = self
            .users
            .get_by_id(acting_user)
            .await?
            .ok_or(CatalogError::UserNotFound)?;

        if !user.is_admin() {
            return Err(CatalogError::Unauthorized);
        }

        Ok(())
    }
}
