//! # Category Repository
//!
//! Database operations for product categories.

use std::collections::HashMap;

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use store_core::Category;

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Inserts a new category.
    pub async fn insert(&self, name: &str) -> DbResult<Category> {
        debug!(name = %name, "Inserting category");

        let result = sqlx::query("INSERT INTO categories (name) VALUES (?1)")
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(Category {
            id: result.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    /// Lists all categories, ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(categories)
    }

    /// Gets a category by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Category>> {
        let category =
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(category)
    }

    /// Fetches the given categories as an id → row map.
    ///
    /// Used when assembling product or order detail responses.
    pub async fn get_many(&self, ids: &[i64]) -> DbResult<HashMap<i64, Category>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        // SQLite cannot bind an array; build the placeholder list by hand.
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("SELECT id, name FROM categories WHERE id IN ({placeholders})");

        let mut query = sqlx::query_as::<_, Category>(&sql);
        for id in ids {
            query = query.bind(id);
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|c| (c.id, c)).collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_insert_list_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.categories();

        let dairy = repo.insert("Dairy").await.unwrap();
        let bread = repo.insert("Bread").await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        // Ordered by name
        assert_eq!(all[0].name, "Bread");
        assert_eq!(all[1].name, "Dairy");

        assert_eq!(repo.get_by_id(dairy.id).await.unwrap(), Some(dairy.clone()));
        assert!(repo.get_by_id(999).await.unwrap().is_none());

        let map = repo.get_many(&[dairy.id, bread.id, 999]).await.unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map[&dairy.id].name, "Dairy");
    }

    #[tokio::test]
    async fn test_get_many_empty_ids() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let map = db.categories().get_many(&[]).await.unwrap();
        assert!(map.is_empty());
    }
}
