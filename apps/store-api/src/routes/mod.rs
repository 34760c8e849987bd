//! # Route Modules
//!
//! One module per resource, each containing its handlers and DTOs.
//!
//! ## REST Surface
//! ```text
//! POST   /cashiers         create cashier
//! GET    /cashiers/{id}    cashier with order history
//! GET    /products         list/search products (?search=)
//! POST   /products         create product
//! PUT    /products/{id}    update product
//! GET    /categories       list categories
//! POST   /categories       create category
//! POST   /orders           submit order (pricing & validation chain)
//! GET    /orders           list orders (?paidOn=YYYY-MM-DD)
//! GET    /orders/{id}      order detail with lines, products, total
//! DELETE /orders/{id}      delete order (lines cascade)
//! GET    /health           liveness + database reachability
//! ```

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;

use crate::AppState;

pub mod cashiers;
pub mod categories;
pub mod health;
pub mod orders;
pub mod products;

/// Assembles the full application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/cashiers", post(cashiers::create_cashier))
        .route("/cashiers/{id}", get(cashiers::get_cashier))
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/products",
            get(products::search_products).post(products::create_product),
        )
        .route("/products/{id}", put(products::update_product))
        .route(
            "/orders",
            get(orders::list_orders).post(orders::create_order),
        )
        .route(
            "/orders/{id}",
            get(orders::get_order).delete(orders::delete_order),
        )
        .with_state(state)
}
