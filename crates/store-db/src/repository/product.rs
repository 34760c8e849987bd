//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Case-insensitive substring search over product AND category name
//! - CRUD operations (no deletion; historical order lines reference products)
//!
//! ## Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      How Search Works                                   │
//! │                                                                         │
//! │  User types: "dairy"                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LIKE '%dairy%' across: product name, category name (lowercased)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Almond Milk (category Dairy)  ← MATCH via category                    │
//! │  Dairy Butter (category Dairy) ← MATCH via name and category           │
//! │  Sourdough Bread               ← no match                              │
//! │                                                                         │
//! │  Empty or absent query returns all products, ordered by name.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use store_core::Product;

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// // Search products
/// let results = repo.search("milk").await?;
///
/// // Get by id
/// let product = repo.get_by_id(1).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

/// Column list shared by every product SELECT.
const PRODUCT_COLUMNS: &str = "p.id, p.name, p.brand, p.price_cents, p.category_id";

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Searches products by substring, case-insensitively, matching either
    /// the product name or its category's name.
    ///
    /// ## Arguments
    /// * `query` - Search term (can be partial). Empty returns all products.
    pub async fn search(&self, query: &str) -> DbResult<Vec<Product>> {
        let query = query.trim();

        debug!(query = %query, "Searching products");

        if query.is_empty() {
            return self.list().await;
        }

        let pattern = format!("%{}%", query.to_lowercase());

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS}
             FROM products p
             JOIN categories c ON c.id = p.category_id
             WHERE lower(p.name) LIKE ?1 OR lower(c.name) LIKE ?1
             ORDER BY p.name"
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Lists all products, ordered by name.
    async fn list(&self) -> DbResult<Vec<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products p ORDER BY p.name");

        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products p WHERE p.id = ?1");

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Fetches the given products as an id → row map.
    ///
    /// Rows that don't exist are simply absent from the map; the pricing
    /// chain treats absence as a nonexistent product.
    pub async fn get_many(&self, ids: &[i64]) -> DbResult<HashMap<i64, Product>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql =
            format!("SELECT {PRODUCT_COLUMNS} FROM products p WHERE p.id IN ({placeholders})");

        let mut query = sqlx::query_as::<_, Product>(&sql);
        for id in ids {
            query = query.bind(id);
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|p| (p.id, p)).collect())
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// The created product with its generated id.
    pub async fn insert(
        &self,
        name: &str,
        brand: &str,
        price_cents: i64,
        category_id: i64,
    ) -> DbResult<Product> {
        debug!(name = %name, brand = %brand, "Inserting product");

        let result = sqlx::query(
            "INSERT INTO products (name, brand, price_cents, category_id)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(name)
        .bind(brand)
        .bind(price_cents)
        .bind(category_id)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            brand: brand.to_string(),
            price_cents,
            category_id,
        })
    }

    /// Updates an existing product (name, brand, price, category).
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(
        &self,
        id: i64,
        name: &str,
        brand: &str,
        price_cents: i64,
        category_id: i64,
    ) -> DbResult<()> {
        debug!(id = %id, "Updating product");

        let result = sqlx::query(
            "UPDATE products SET
                name = ?2,
                brand = ?3,
                price_cents = ?4,
                category_id = ?5
             WHERE id = ?1",
        )
        .bind(id)
        .bind(name)
        .bind(brand)
        .bind(price_cents)
        .bind(category_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts products (for seed idempotence checks).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn seeded_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let dairy = db.categories().insert("Dairy").await.unwrap();
        let bread = db.categories().insert("Bread").await.unwrap();

        db.products()
            .insert("Almond Milk", "Silk", 250, dairy.id)
            .await
            .unwrap();
        db.products()
            .insert("Sourdough Bread", "Wheaties", 399, bread.id)
            .await
            .unwrap();

        db
    }

    #[tokio::test]
    async fn test_search_matches_product_name() {
        let db = seeded_db().await;

        let hits = db.products().search("MILK").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Almond Milk");
    }

    #[tokio::test]
    async fn test_search_matches_category_name() {
        let db = seeded_db().await;

        let hits = db.products().search("dairy").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Almond Milk");
    }

    #[tokio::test]
    async fn test_empty_search_lists_all() {
        let db = seeded_db().await;

        let hits = db.products().search("  ").await.unwrap();
        assert_eq!(hits.len(), 2);
        // Ordered by name
        assert_eq!(hits[0].name, "Almond Milk");
        assert_eq!(hits[1].name, "Sourdough Bread");
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let db = seeded_db().await;
        let repo = db.products();

        let milk = repo.search("milk").await.unwrap().remove(0);
        repo.update(milk.id, "Oat Milk", "Oatly", 329, milk.category_id)
            .await
            .unwrap();

        let updated = repo.get_by_id(milk.id).await.unwrap().unwrap();
        assert_eq!(updated.name, "Oat Milk");
        assert_eq!(updated.brand, "Oatly");
        assert_eq!(updated.price_cents, 329);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let db = seeded_db().await;

        let err = db
            .products()
            .update(999, "Ghost", "None", 0, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_many_skips_missing() {
        let db = seeded_db().await;

        let map = db.products().get_many(&[1, 2, 999]).await.unwrap();
        assert_eq!(map.len(), 2);
        assert!(!map.contains_key(&999));
    }
}
