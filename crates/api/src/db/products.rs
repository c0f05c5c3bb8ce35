//! Product repository for database operations.
//!
//! Prices are stored as decimal strings and parsed back into
//! [`rust_decimal::Decimal`] on read, so no floating point rounding can
//! creep in through the database.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use tradepost_core::ProductId;

use super::RepositoryError;
use crate::models::{NewProduct, Product, ProductPatch};

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    description: Option<String>,
    price: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> Result<Product, RepositoryError> {
        let price = Decimal::from_str(&self.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;

        Ok(Product {
            id: self.id,
            name: self.name,
            description: self.description,
            price,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewProduct) -> Result<Product, RepositoryError> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            INSERT INTO products (name, description, price, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, name, description, price, created_at, updated_at
            ",
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.price.to_string())
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        row.into_product()
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored price is invalid.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, description, price, created_at, updated_at
            FROM products
            WHERE id = ?
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(ProductRow::into_product).transpose()
    }

    /// List all products, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored price is invalid.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, description, price, created_at, updated_at
            FROM products
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }

    /// Apply a partial update. `None` fields keep their current value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            UPDATE products
            SET name = COALESCE(?, name),
                description = COALESCE(?, description),
                price = COALESCE(?, price),
                updated_at = ?
            WHERE id = ?
            RETURNING id, name, description, price, created_at, updated_at
            ",
        )
        .bind(&patch.name)
        .bind(&patch.description)
        .bind(patch.price.map(|p| p.to_string()))
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(r) => r.into_product(),
            None => Err(RepositoryError::NotFound),
        }
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Whether a product with this ID exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM products WHERE id = ?)")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        Ok(exists)
    }

    /// Delete every product. Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM products").execute(self.pool).await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::memory_pool;

    fn new_product(name: &str, price: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: None,
            price: Decimal::from_str(price).expect("valid decimal"),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_preserves_price_exactly() {
        let pool = memory_pool().await;
        let repo = ProductRepository::new(&pool);

        let created = repo
            .create(&new_product("Keyboard", "19.99"))
            .await
            .expect("create product");
        assert_eq!(created.price, Decimal::from_str("19.99").unwrap());

        let fetched = repo
            .get(created.id)
            .await
            .expect("query ok")
            .expect("product exists");
        assert_eq!(fetched, created);
        assert_eq!(fetched.price.to_string(), "19.99");
    }

    #[tokio::test]
    async fn test_list_returns_products_in_id_order() {
        let pool = memory_pool().await;
        let repo = ProductRepository::new(&pool);

        let first = repo.create(&new_product("A", "1")).await.expect("create");
        let second = repo.create(&new_product("B", "2")).await.expect("create");

        let all = repo.list().await.expect("list products");
        assert_eq!(
            all.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![first.id, second.id]
        );
    }

    #[tokio::test]
    async fn test_update_keeps_unpatched_fields() {
        let pool = memory_pool().await;
        let repo = ProductRepository::new(&pool);

        let created = repo
            .create(&NewProduct {
                name: "Mug".to_string(),
                description: Some("ceramic".to_string()),
                price: Decimal::from_str("8.50").unwrap(),
            })
            .await
            .expect("create product");

        let updated = repo
            .update(
                created.id,
                &ProductPatch {
                    price: Some(Decimal::from_str("9.00").unwrap()),
                    ..ProductPatch::default()
                },
            )
            .await
            .expect("update product");

        assert_eq!(updated.name, "Mug");
        assert_eq!(updated.description.as_deref(), Some("ceramic"));
        assert_eq!(updated.price, Decimal::from_str("9.00").unwrap());
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let pool = memory_pool().await;
        let repo = ProductRepository::new(&pool);

        let err = repo
            .update(ProductId::new(404), &ProductPatch::default())
            .await
            .expect_err("missing product");
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = memory_pool().await;
        let repo = ProductRepository::new(&pool);

        let created = repo.create(&new_product("Gone", "1")).await.expect("create");
        repo.delete(created.id).await.expect("delete product");

        assert!(!repo.exists(created.id).await.expect("query ok"));
        let err = repo.delete(created.id).await.expect_err("already deleted");
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_all() {
        let pool = memory_pool().await;
        let repo = ProductRepository::new(&pool);

        repo.create(&new_product("A", "1")).await.expect("create");
        repo.create(&new_product("B", "2")).await.expect("create");

        let removed = repo.delete_all().await.expect("delete all");
        assert_eq!(removed, 2);
        assert!(repo.list().await.expect("list").is_empty());
    }
}
