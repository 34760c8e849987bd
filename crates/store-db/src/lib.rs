//! # store-db: Database Layer for CornerStore
//!
//! This crate provides database access for the CornerStore API.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       CornerStore Data Flow                             │
//! │                                                                         │
//! │  Axum handler (POST /orders)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     store-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  cashier.rs   │    │  (embedded)  │  │   │
//! │  │   │               │    │  category.rs  │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│  product.rs   │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │    │  order.rs     │    │              │  │   │
//! │  │   │ Management    │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │                       SQLite Database                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (cashier, category, product, order)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use store_db::{Database, DbConfig};
//!
//! // Create database with default config (runs migrations)
//! let config = DbConfig::new("path/to/store.db");
//! let db = Database::new(config).await?;
//!
//! // Use repositories
//! let products = db.products().search("milk").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::cashier::CashierRepository;
pub use repository::category::CategoryRepository;
pub use repository::order::{OrderRepository, OrderWithLines, SubmitError};
pub use repository::product::ProductRepository;
