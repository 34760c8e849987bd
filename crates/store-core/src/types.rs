//! # Domain Types
//!
//! Core domain types used throughout CornerStore.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Cashier      │   │     Order       │   │   OrderLine     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  cashier_id     │◄──│  order_id       │       │
//! │  │  first_name     │   │  paid_on_date   │   │  product_id     │       │
//! │  │  last_name      │   │  (nullable)     │   │  quantity       │       │
//! │  └─────────────────┘   └─────────────────┘   │  unit_price     │       │
//! │                                              └────────┬────────┘       │
//! │  ┌─────────────────┐   ┌─────────────────┐            │                │
//! │  │    Category     │   │    Product      │◄───────────┘                │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  id             │◄──│  category_id    │                             │
//! │  │  name           │   │  name, brand    │                             │
//! │  └─────────────────┘   │  price_cents    │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## One-Directional References
//! Every association is a foreign-key id on the child row. Parent types never
//! hold collections of children; child collections are repository query
//! results assembled at the call site.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Cashier
// =============================================================================

/// A cashier who can be attached to orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Cashier {
    /// Database-generated row id.
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl Cashier {
    /// Full display name, derived from first and last name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    pub name: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub brand: String,
    /// Unit price in cents (smallest currency unit). Never negative.
    pub price_cents: i64,
    /// Category this product belongs to.
    pub category_id: i64,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Order
// =============================================================================

/// An order header.
///
/// The total is NOT stored here: it is a derived attribute, computed on
/// demand from the order's line items (see [`crate::pricing::order_total`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    /// Cashier who rang up the order.
    pub cashier_id: i64,
    /// When the order was settled. NULL means unpaid/open.
    /// Always NULL at creation time; only ever set externally.
    pub paid_on_date: Option<DateTime<Utc>>,
}

impl Order {
    /// Whether the order has been settled.
    #[inline]
    pub fn is_paid(&self) -> bool {
        self.paid_on_date.is_some()
    }
}

// =============================================================================
// Order Line
// =============================================================================

/// A line item on an order.
///
/// Uses the snapshot pattern: `unit_price_cents` freezes the product price at
/// submission time, so later price changes never rewrite settled orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderLine {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    /// Quantity ordered. Always positive.
    pub quantity: i64,
    /// Unit price in cents at time of submission (frozen).
    pub unit_price_cents: i64,
}

impl OrderLine {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cashier_full_name() {
        let cashier = Cashier {
            id: 1,
            first_name: "Jim".to_string(),
            last_name: "Bob".to_string(),
        };
        assert_eq!(cashier.full_name(), "Jim Bob");
    }

    #[test]
    fn test_product_price() {
        let product = Product {
            id: 1,
            name: "Almond Milk".to_string(),
            brand: "Silk".to_string(),
            price_cents: 250,
            category_id: 1,
        };
        assert_eq!(product.price(), Money::from_cents(250));
    }

    #[test]
    fn test_order_is_paid() {
        let mut order = Order {
            id: 1,
            cashier_id: 1,
            paid_on_date: None,
        };
        assert!(!order.is_paid());

        order.paid_on_date = Some(Utc::now());
        assert!(order.is_paid());
    }

    #[test]
    fn test_line_total() {
        let line = OrderLine {
            id: 1,
            order_id: 1,
            product_id: 1,
            quantity: 3,
            unit_price_cents: 250,
        };
        assert_eq!(line.line_total().cents(), 750);
    }
}
