//! # store-core: Pure Business Logic for CornerStore
//!
//! This crate is the **heart** of the CornerStore API. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      CornerStore Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   store-api (Axum handlers)                     │   │
//! │  │    POST /orders, GET /products, POST /cashiers, ...            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ store-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │price_order│  │   rules   │  │   │
//! │  │   │   Order   │  │  (cents)  │  │order_total│  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   store-db (Database Layer)                     │   │
//! │  │             SQLite queries, migrations, repositories            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Cashier, Category, Product, Order, OrderLine)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Order validation chain and total computation
//! - [`error`] - Domain error types
//! - [`validation`] - Field-level input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use store_core::money::Money;
//!
//! // Create money from cents (never from floats!)
//! let unit_price = Money::from_cents(250); // $2.50
//! let line_total = unit_price.multiply_quantity(3);
//!
//! assert_eq!(line_total.cents(), 750);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use store_core::Money` instead of
// `use store_core::money::Money`

pub use error::{OrderRejection, ValidationError};
pub use money::Money;
pub use pricing::{LineDraft, OrderDraft};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single product on one order line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Maximum length of free-text name fields (product, brand, category, cashier).
pub const MAX_NAME_LEN: usize = 200;
