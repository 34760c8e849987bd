//! # Order Repository
//!
//! Database operations for orders and their line items, including the order
//! submission flow.
//!
//! ## Submission Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Submission                                  │
//! │                                                                         │
//! │  1. RESOLVE (reads, no transaction)                                    │
//! │     ├── cashier row for draft.cashier_id                               │
//! │     └── product rows for draft.product_ids()                           │
//! │                                                                         │
//! │  2. VALIDATE & PRICE (pure, store-core::pricing)                       │
//! │     └── price_order() → total, or the first rejection                  │
//! │                                                                         │
//! │  3. PERSIST (one transaction)                                          │
//! │     ├── INSERT order (paid_on_date NULL)                               │
//! │     ├── INSERT one line per item, unit price snapshotted               │
//! │     └── COMMIT                                                         │
//! │                                                                         │
//! │  A rejected submission never reaches step 3: nothing is written.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no optimistic concurrency between steps 1 and 3; a row deleted
//! in between trips the foreign-key constraint and surfaces as a DbError.

use std::collections::HashMap;

use chrono::NaiveDate;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::cashier::CashierRepository;
use crate::repository::product::ProductRepository;
use store_core::pricing::{self, OrderDraft};
use store_core::{validation, Money, Order, OrderLine, OrderRejection, ValidationError};

// =============================================================================
// Result Types
// =============================================================================

/// An order header together with its loaded line items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderWithLines {
    pub order: Order,
    pub lines: Vec<OrderLine>,
}

impl OrderWithLines {
    /// The order's total, computed on demand from its lines. Never stored.
    pub fn total(&self) -> Money {
        pricing::order_total(&self.lines)
    }
}

/// Why an order submission did not produce an order.
///
/// Rejections are caller errors (HTTP 400); everything else is a storage
/// failure (HTTP 500, or 400 for a constraint trip).
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Rejected(#[from] OrderRejection),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<sqlx::Error> for SubmitError {
    fn from(err: sqlx::Error) -> Self {
        SubmitError::Db(err.into())
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Submits a proposed order: validates it, prices it, and persists it
    /// with its line items in a single transaction.
    ///
    /// ## Semantics
    /// - Validation chain short-circuits at the first failure
    ///   (cashier → emptiness → products); see [`store_core::pricing`].
    /// - `paid_on_date` is always NULL on the created order, regardless of
    ///   anything the caller sent.
    /// - Each line snapshots the product's current price into
    ///   `unit_price_cents`.
    /// - A failed call writes nothing.
    pub async fn submit(&self, draft: &OrderDraft) -> Result<OrderWithLines, SubmitError> {
        debug!(cashier_id = draft.cashier_id, items = draft.items.len(), "Submitting order");

        // Resolve referenced rows, then validate and price without I/O.
        let cashier = CashierRepository::new(self.pool.clone())
            .get_by_id(draft.cashier_id)
            .await?;
        let catalog = ProductRepository::new(self.pool.clone())
            .get_many(&draft.product_ids())
            .await?;

        let total = pricing::price_order(draft, cashier.as_ref(), &catalog)?;

        // Quantity bounds are an input-validation concern, not one of the
        // three rejections; the rejection chain above still wins on ordering.
        for item in &draft.items {
            validation::validate_quantity(item.quantity)?;
        }

        // Persist order + lines as one unit.
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("INSERT INTO orders (cashier_id, paid_on_date) VALUES (?1, NULL)")
            .bind(draft.cashier_id)
            .execute(&mut *tx)
            .await?;
        let order_id = result.last_insert_rowid();

        let mut lines = Vec::with_capacity(draft.items.len());
        for item in &draft.items {
            // price_order already validated every id; re-check instead of
            // indexing so a logic slip can never panic the request path.
            let unit_price_cents = catalog
                .get(&item.product_id)
                .ok_or(OrderRejection::InvalidProduct(item.product_id))?
                .price_cents;

            let result = sqlx::query(
                "INSERT INTO order_lines (order_id, product_id, quantity, unit_price_cents)
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(order_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(unit_price_cents)
            .execute(&mut *tx)
            .await?;

            lines.push(OrderLine {
                id: result.last_insert_rowid(),
                order_id,
                product_id: item.product_id,
                quantity: item.quantity,
                unit_price_cents,
            });
        }

        tx.commit().await?;

        info!(order_id = order_id, total = %total, lines = lines.len(), "Order created");

        Ok(OrderWithLines {
            order: Order {
                id: order_id,
                cashier_id: draft.cashier_id,
                paid_on_date: None,
            },
            lines,
        })
    }

    /// Gets an order header by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT id, cashier_id, paid_on_date FROM orders WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Gets an order together with its line items.
    pub async fn get_with_lines(&self, id: i64) -> DbResult<Option<OrderWithLines>> {
        let Some(order) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let lines = self.lines_for_order(id).await?;
        Ok(Some(OrderWithLines { order, lines }))
    }

    /// Gets all line items for one order.
    pub async fn lines_for_order(&self, order_id: i64) -> DbResult<Vec<OrderLine>> {
        let lines = sqlx::query_as::<_, OrderLine>(
            "SELECT id, order_id, product_id, quantity, unit_price_cents
             FROM order_lines
             WHERE order_id = ?1
             ORDER BY id",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Gets line items for a set of orders, grouped by order id.
    ///
    /// Used when assembling a cashier's order history in one pass.
    pub async fn lines_for_orders(
        &self,
        order_ids: &[i64],
    ) -> DbResult<HashMap<i64, Vec<OrderLine>>> {
        if order_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let placeholders = vec!["?"; order_ids.len()].join(", ");
        let sql = format!(
            "SELECT id, order_id, product_id, quantity, unit_price_cents
             FROM order_lines
             WHERE order_id IN ({placeholders})
             ORDER BY id"
        );

        let mut query = sqlx::query_as::<_, OrderLine>(&sql);
        for id in order_ids {
            query = query.bind(id);
        }

        let rows = query.fetch_all(&self.pool).await?;

        let mut grouped: HashMap<i64, Vec<OrderLine>> = HashMap::new();
        for line in rows {
            grouped.entry(line.order_id).or_default().push(line);
        }
        Ok(grouped)
    }

    /// Gets all orders for one cashier, oldest first.
    pub async fn orders_for_cashier(&self, cashier_id: i64) -> DbResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT id, cashier_id, paid_on_date FROM orders WHERE cashier_id = ?1 ORDER BY id",
        )
        .bind(cashier_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Lists orders, optionally filtered to those paid on a calendar day.
    ///
    /// Unpaid orders (NULL paid_on_date) never match a date filter.
    pub async fn list(&self, paid_on: Option<NaiveDate>) -> DbResult<Vec<Order>> {
        let orders = match paid_on {
            Some(day) => {
                sqlx::query_as::<_, Order>(
                    "SELECT id, cashier_id, paid_on_date
                     FROM orders
                     WHERE paid_on_date IS NOT NULL AND date(paid_on_date) = date(?1)
                     ORDER BY id",
                )
                .bind(day)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Order>(
                    "SELECT id, cashier_id, paid_on_date FROM orders ORDER BY id",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(orders)
    }

    /// Deletes an order. Line items cascade.
    ///
    /// ## Returns
    /// * `Ok(())` - Deleted
    /// * `Err(DbError::NotFound)` - Order doesn't exist
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting order");

        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
