//! # Cashier Routes
//!
//! Cashier creation and the cashier-with-order-history view.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::routes::orders::LineItemResponse;
use crate::AppState;
use store_core::pricing;
use store_core::validation::validate_name;
use store_core::Cashier;

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCashierRequest {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashierResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
}

impl From<Cashier> for CashierResponse {
    fn from(cashier: Cashier) -> Self {
        let full_name = cashier.full_name();
        CashierResponse {
            id: cashier.id,
            first_name: cashier.first_name,
            last_name: cashier.last_name,
            full_name,
        }
    }
}

/// One order in a cashier's history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashierOrderResponse {
    pub id: i64,
    pub paid_on_date: Option<DateTime<Utc>>,
    pub total_cents: i64,
    pub items: Vec<LineItemResponse>,
}

/// Cashier with their full order history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashierDetailResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub orders: Vec<CashierOrderResponse>,
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /cashiers
pub async fn create_cashier(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCashierRequest>,
) -> Result<(StatusCode, Json<CashierResponse>), ApiError> {
    debug!(first_name = %req.first_name, last_name = %req.last_name, "create_cashier");

    validate_name("firstName", &req.first_name)?;
    validate_name("lastName", &req.last_name)?;

    let cashier = state
        .db
        .cashiers()
        .insert(req.first_name.trim(), req.last_name.trim())
        .await?;

    Ok((StatusCode::CREATED, Json(cashier.into())))
}

/// GET /cashiers/{id}
///
/// Returns the cashier with every order they rang up, each order carrying
/// its line items and on-demand total.
pub async fn get_cashier(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<CashierDetailResponse>, ApiError> {
    let Some(cashier) = state.db.cashiers().get_by_id(id).await? else {
        return Err(ApiError::not_found("Cashier", id));
    };

    let orders = state.db.orders().orders_for_cashier(id).await?;
    let order_ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
    let mut lines_by_order = state.db.orders().lines_for_orders(&order_ids).await?;

    let orders = orders
        .into_iter()
        .map(|order| {
            let lines = lines_by_order.remove(&order.id).unwrap_or_default();
            CashierOrderResponse {
                id: order.id,
                paid_on_date: order.paid_on_date,
                total_cents: pricing::order_total(&lines).cents(),
                items: lines.iter().map(Into::into).collect(),
            }
        })
        .collect();

    let full_name = cashier.full_name();
    Ok(Json(CashierDetailResponse {
        id: cashier.id,
        first_name: cashier.first_name,
        last_name: cashier.last_name,
        full_name,
        orders,
    }))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use store_core::pricing::{LineDraft, OrderDraft};
    use store_db::{Database, DbConfig};

    #[tokio::test]
    async fn test_create_cashier() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let state = Arc::new(AppState { db });

        let req = CreateCashierRequest {
            first_name: "Steve".to_string(),
            last_name: "Texas".to_string(),
        };

        let (status, Json(body)) = create_cashier(State(state), Json(req)).await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.full_name, "Steve Texas");
    }

    #[tokio::test]
    async fn test_create_cashier_rejects_blank_name() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let state = Arc::new(AppState { db });

        let req = CreateCashierRequest {
            first_name: "  ".to_string(),
            last_name: "Texas".to_string(),
        };

        let err = create_cashier(State(state), Json(req)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_get_cashier_with_orders() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let cashier = db.cashiers().insert("Jim", "Bob").await.unwrap();
        let dairy = db.categories().insert("Dairy").await.unwrap();
        let milk = db
            .products()
            .insert("Almond Milk", "Silk", 250, dairy.id)
            .await
            .unwrap();

        db.orders()
            .submit(&OrderDraft {
                cashier_id: cashier.id,
                items: vec![LineDraft {
                    product_id: milk.id,
                    quantity: 2,
                }],
            })
            .await
            .unwrap();

        let state = Arc::new(AppState { db });
        let Json(detail) = get_cashier(State(state.clone()), Path(cashier.id))
            .await
            .unwrap();

        assert_eq!(detail.full_name, "Jim Bob");
        assert_eq!(detail.orders.len(), 1);
        assert_eq!(detail.orders[0].total_cents, 500);
        assert_eq!(detail.orders[0].items.len(), 1);

        let err = get_cashier(State(state), Path(999)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
