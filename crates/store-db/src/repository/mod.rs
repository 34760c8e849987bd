//! # Repository Module
//!
//! Database repository implementations for CornerStore.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Axum handler                                                          │
//! │       │                                                                 │
//! │       │  db.products().search("milk")                                   │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── search(&self, query)                                              │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── insert(&self, ...)                                                │
//! │  └── update(&self, ...)                                                │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Each repository owns one table's queries. The only cross-table        │
//! │  routine is OrderRepository::submit, which is the order pricing &      │
//! │  validation flow and needs a single transaction.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`cashier::CashierRepository`] - Cashier inserts and lookups
//! - [`category::CategoryRepository`] - Category CRUD
//! - [`product::ProductRepository`] - Product CRUD and search
//! - [`order::OrderRepository`] - Order submission, lookups, deletion

pub mod cashier;
pub mod category;
pub mod order;
pub mod product;
