//! # Cashier Repository
//!
//! Database operations for cashiers.
//!
//! Cashiers are created once and never updated or deleted; orders reference
//! them by id.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use store_core::Cashier;

/// Repository for cashier database operations.
#[derive(Debug, Clone)]
pub struct CashierRepository {
    pool: SqlitePool,
}

impl CashierRepository {
    /// Creates a new CashierRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CashierRepository { pool }
    }

    /// Inserts a new cashier.
    ///
    /// ## Returns
    /// The created cashier with its generated id.
    pub async fn insert(&self, first_name: &str, last_name: &str) -> DbResult<Cashier> {
        debug!(first_name = %first_name, last_name = %last_name, "Inserting cashier");

        let result = sqlx::query("INSERT INTO cashiers (first_name, last_name) VALUES (?1, ?2)")
            .bind(first_name)
            .bind(last_name)
            .execute(&self.pool)
            .await?;

        Ok(Cashier {
            id: result.last_insert_rowid(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        })
    }

    /// Gets a cashier by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Cashier))` - Cashier found
    /// * `Ok(None)` - Cashier not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Cashier>> {
        let cashier = sqlx::query_as::<_, Cashier>(
            "SELECT id, first_name, last_name FROM cashiers WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(cashier)
    }

    /// Counts cashiers (for seed idempotence checks).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cashiers")
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

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let created = db.cashiers().insert("Jim", "Bob").await.unwrap();
        assert!(created.id > 0);

        let fetched = db.cashiers().get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.full_name(), "Jim Bob");
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.cashiers().get_by_id(999).await.unwrap().is_none());
    }
}
