//! # Product Routes
//!
//! Product search, creation, and update. Products are never deleted:
//! historical order lines keep referencing them.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::routes::categories::CategoryResponse;
use crate::AppState;
use store_core::validation::{validate_name, validate_price_cents, validate_search_query};
use store_core::{Category, Product};
use store_db::DbError;

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub search: Option<String>,
}

/// Shared body for product create and update.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub brand: String,
    pub price_cents: i64,
    pub category_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub price_cents: i64,
    pub category: CategoryResponse,
}

impl ProductResponse {
    pub fn from_parts(product: Product, category: Category) -> Self {
        ProductResponse {
            id: product.id,
            name: product.name,
            brand: product.brand,
            price_cents: product.price_cents,
            category: category.into(),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /products?search=
///
/// Case-insensitive substring match over product name or category name.
/// Absent or empty query lists all products.
pub async fn search_products(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let query = validate_search_query(params.search.as_deref().unwrap_or(""))?;

    let products = state.db.products().search(&query).await?;

    let category_ids: Vec<i64> = products.iter().map(|p| p.category_id).collect();
    let categories = state.db.categories().get_many(&category_ids).await?;

    let mut responses = Vec::with_capacity(products.len());
    for product in products {
        // Guaranteed by the foreign key; a miss means a corrupted database.
        let category = categories
            .get(&product.category_id)
            .cloned()
            .ok_or_else(|| {
                DbError::Internal(format!(
                    "product {} references missing category {}",
                    product.id, product.category_id
                ))
            })?;
        responses.push(ProductResponse::from_parts(product, category));
    }

    Ok(Json(responses))
}

/// POST /products
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProductPayload>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    debug!(name = %req.name, brand = %req.brand, "create_product");

    validate_payload(&req)?;

    let category = state
        .db
        .categories()
        .get_by_id(req.category_id)
        .await?
        .ok_or_else(|| ApiError::invalid_reference("category", req.category_id))?;

    let product = state
        .db
        .products()
        .insert(
            req.name.trim(),
            req.brand.trim(),
            req.price_cents,
            req.category_id,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductResponse::from_parts(product, category)),
    ))
}

/// PUT /products/{id}
///
/// Replaces name, brand, price, and category of an existing product.
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<ProductPayload>,
) -> Result<StatusCode, ApiError> {
    debug!(id = id, "update_product");

    validate_payload(&req)?;

    state
        .db
        .categories()
        .get_by_id(req.category_id)
        .await?
        .ok_or_else(|| ApiError::invalid_reference("category", req.category_id))?;

    state
        .db
        .products()
        .update(
            id,
            req.name.trim(),
            req.brand.trim(),
            req.price_cents,
            req.category_id,
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

fn validate_payload(req: &ProductPayload) -> Result<(), ApiError> {
    validate_name("name", &req.name)?;
    validate_name("brand", &req.brand)?;
    validate_price_cents(req.price_cents)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use store_db::{Database, DbConfig};

    async fn test_state() -> (Arc<AppState>, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let dairy = db.categories().insert("Dairy").await.unwrap();
        (Arc::new(AppState { db }), dairy.id)
    }

    #[tokio::test]
    async fn test_create_then_search() {
        let (state, dairy_id) = test_state().await;

        let req = ProductPayload {
            name: "Almond Milk".to_string(),
            brand: "Silk".to_string(),
            price_cents: 250,
            category_id: dairy_id,
        };
        let (status, Json(created)) = create_product(State(state.clone()), Json(req))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.category.name, "Dairy");

        // Matches via category name, case-insensitively
        let Json(hits) = search_products(
            State(state),
            Query(SearchParams {
                search: Some("DAIRY".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Almond Milk");
    }

    #[tokio::test]
    async fn test_create_with_unknown_category() {
        let (state, _) = test_state().await;

        let req = ProductPayload {
            name: "Ghost".to_string(),
            brand: "None".to_string(),
            price_cents: 100,
            category_id: 999,
        };
        let err = create_product(State(state), Json(req)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidReference);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_missing_product_is_404() {
        let (state, dairy_id) = test_state().await;

        let req = ProductPayload {
            name: "Oat Milk".to_string(),
            brand: "Oatly".to_string(),
            price_cents: 329,
            category_id: dairy_id,
        };
        let err = update_product(State(state), Path(999), Json(req))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_negative_price_rejected() {
        let (state, dairy_id) = test_state().await;

        let req = ProductPayload {
            name: "Almond Milk".to_string(),
            brand: "Silk".to_string(),
            price_cents: -1,
            category_id: dairy_id,
        };
        let err = create_product(State(state), Json(req)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
