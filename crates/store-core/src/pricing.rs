//! # Order Pricing & Validation
//!
//! The one piece of real business logic in CornerStore: validating a proposed
//! order against the cashier and product rows it references, and pricing it.
//!
//! ## Validation Chain
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /orders                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  cashier exists? ──── no ──► InvalidCashier                            │
//! │       │ yes                                                             │
//! │       ▼                                                                 │
//! │  items non-empty? ─── no ──► EmptyOrder                                │
//! │       │ yes                                                             │
//! │       ▼                                                                 │
//! │  every product exists? ─ no ─► InvalidProduct(first offending id)      │
//! │       │ yes                                                             │
//! │       ▼                                                                 │
//! │  total = Σ price × qty   (integer cents, exact)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  persist order + lines in one transaction (store-db)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This module is the pure half of that diagram: it operates on pre-fetched
//! rows and never touches the database. The transaction boundary lives in
//! store-db's order repository.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::OrderRejection;
use crate::money::Money;
use crate::types::{Cashier, OrderLine, Product};

// =============================================================================
// Draft Types
// =============================================================================

/// A proposed order, as submitted by a client.
///
/// Carries references only; the referenced rows are resolved by the caller
/// and handed to [`price_order`]. A caller-supplied paid date is not even
/// representable here: orders are always created unpaid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub cashier_id: i64,
    pub items: Vec<LineDraft>,
}

/// One proposed line item: a (product, quantity) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDraft {
    pub product_id: i64,
    pub quantity: i64,
}

impl OrderDraft {
    /// Distinct product ids referenced by this draft, for batch lookup.
    pub fn product_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.items.iter().map(|item| item.product_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

// =============================================================================
// Validation & Pricing (write path)
// =============================================================================

/// Validates a draft against resolved rows and computes its total.
///
/// ## Arguments
/// * `draft` - The proposed order
/// * `cashier` - Result of looking up `draft.cashier_id` (None = absent)
/// * `catalog` - Products resolved for `draft.product_ids()`, keyed by id.
///   A product missing from the map is treated as nonexistent.
///
/// ## Semantics
/// Short-circuits at the first failure, in chain order: cashier, emptiness,
/// then line items in draft order. `InvalidProduct` names the first offending
/// id only; no aggregation.
///
/// ## Example
/// ```rust
/// use std::collections::HashMap;
/// use store_core::pricing::{price_order, LineDraft, OrderDraft};
/// use store_core::types::{Cashier, Product};
///
/// let cashier = Cashier { id: 1, first_name: "Jim".into(), last_name: "Bob".into() };
/// let milk = Product { id: 1, name: "Almond Milk".into(), brand: "Silk".into(), price_cents: 250, category_id: 1 };
/// let catalog = HashMap::from([(1, milk)]);
///
/// let draft = OrderDraft {
///     cashier_id: 1,
///     items: vec![LineDraft { product_id: 1, quantity: 3 }],
/// };
///
/// let total = price_order(&draft, Some(&cashier), &catalog).unwrap();
/// assert_eq!(total.cents(), 750);
/// ```
pub fn price_order(
    draft: &OrderDraft,
    cashier: Option<&Cashier>,
    catalog: &HashMap<i64, Product>,
) -> Result<Money, OrderRejection> {
    if cashier.is_none() {
        return Err(OrderRejection::InvalidCashier);
    }

    if draft.items.is_empty() {
        return Err(OrderRejection::EmptyOrder);
    }

    let mut total = Money::zero();
    for item in &draft.items {
        let product = catalog
            .get(&item.product_id)
            .ok_or(OrderRejection::InvalidProduct(item.product_id))?;

        total += product.price().multiply_quantity(item.quantity);
    }

    Ok(total)
}

// =============================================================================
// Total Computation (read path)
// =============================================================================

/// Computes an order's total from its loaded line items.
///
/// Pure projection: `Σ unit_price × quantity`, exactly `0` for an order with
/// no loaded lines. Each line carries its own unit-price snapshot, so the
/// computation never depends on live product rows.
pub fn order_total(lines: &[OrderLine]) -> Money {
    lines.iter().map(OrderLine::line_total).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cashier() -> Cashier {
        Cashier {
            id: 1,
            first_name: "Jim".to_string(),
            last_name: "Bob".to_string(),
        }
    }

    fn catalog() -> HashMap<i64, Product> {
        HashMap::from([
            (
                1,
                Product {
                    id: 1,
                    name: "Almond Milk".to_string(),
                    brand: "Silk".to_string(),
                    price_cents: 250,
                    category_id: 1,
                },
            ),
            (
                2,
                Product {
                    id: 2,
                    name: "Pork Tenderloin".to_string(),
                    brand: "Butchers".to_string(),
                    price_cents: 1000,
                    category_id: 3,
                },
            ),
        ])
    }

    #[test]
    fn test_valid_order_totals_exactly() {
        // $2.50 × 3 + $10.00 × 1 = $17.50
        let draft = OrderDraft {
            cashier_id: 1,
            items: vec![
                LineDraft {
                    product_id: 1,
                    quantity: 3,
                },
                LineDraft {
                    product_id: 2,
                    quantity: 1,
                },
            ],
        };

        let total = price_order(&draft, Some(&cashier()), &catalog()).unwrap();
        assert_eq!(total.cents(), 1750);
    }

    #[test]
    fn test_missing_cashier_rejected_regardless_of_items() {
        let draft = OrderDraft {
            cashier_id: 999,
            items: vec![LineDraft {
                product_id: 1,
                quantity: 3,
            }],
        };

        assert_eq!(
            price_order(&draft, None, &catalog()),
            Err(OrderRejection::InvalidCashier)
        );

        // Cashier check fires first even when the items are also bad
        let bad_items = OrderDraft {
            cashier_id: 999,
            items: vec![],
        };
        assert_eq!(
            price_order(&bad_items, None, &catalog()),
            Err(OrderRejection::InvalidCashier)
        );
    }

    #[test]
    fn test_empty_order_rejected_with_valid_cashier() {
        let draft = OrderDraft {
            cashier_id: 1,
            items: vec![],
        };

        assert_eq!(
            price_order(&draft, Some(&cashier()), &catalog()),
            Err(OrderRejection::EmptyOrder)
        );
    }

    #[test]
    fn test_first_invalid_product_named() {
        // One valid then two invalid lines: only the first offending id
        // is reported.
        let draft = OrderDraft {
            cashier_id: 1,
            items: vec![
                LineDraft {
                    product_id: 1,
                    quantity: 1,
                },
                LineDraft {
                    product_id: 77,
                    quantity: 1,
                },
                LineDraft {
                    product_id: 88,
                    quantity: 1,
                },
            ],
        };

        assert_eq!(
            price_order(&draft, Some(&cashier()), &catalog()),
            Err(OrderRejection::InvalidProduct(77))
        );
    }

    #[test]
    fn test_product_ids_deduplicated() {
        let draft = OrderDraft {
            cashier_id: 1,
            items: vec![
                LineDraft {
                    product_id: 2,
                    quantity: 1,
                },
                LineDraft {
                    product_id: 1,
                    quantity: 1,
                },
                LineDraft {
                    product_id: 2,
                    quantity: 4,
                },
            ],
        };

        assert_eq!(draft.product_ids(), vec![1, 2]);
    }

    #[test]
    fn test_order_total_pure_and_idempotent() {
        let lines = vec![
            OrderLine {
                id: 1,
                order_id: 1,
                product_id: 1,
                quantity: 3,
                unit_price_cents: 250,
            },
            OrderLine {
                id: 2,
                order_id: 1,
                product_id: 2,
                quantity: 1,
                unit_price_cents: 1000,
            },
        ];

        let first = order_total(&lines);
        let second = order_total(&lines);
        assert_eq!(first.cents(), 1750);
        assert_eq!(first, second);
    }

    #[test]
    fn test_order_total_zero_on_no_lines() {
        assert_eq!(order_total(&[]).cents(), 0);
    }
}
