//! # Category Routes

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::AppState;
use store_core::validation::validate_name;
use store_core::Category;

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        CategoryResponse {
            id: category.id,
            name: category.name,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /categories
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let categories = state.db.categories().list().await?;

    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// POST /categories
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    debug!(name = %req.name, "create_category");

    validate_name("name", &req.name)?;

    let category = state.db.categories().insert(req.name.trim()).await?;

    Ok((StatusCode::CREATED, Json(category.into())))
}
