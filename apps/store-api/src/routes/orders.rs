//! # Order Routes
//!
//! Order submission (the pricing & validation flow), lookups, listing with a
//! paid-date filter, and deletion.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::routes::cashiers::CashierResponse;
use crate::routes::products::ProductResponse;
use crate::AppState;
use store_core::pricing::{LineDraft, OrderDraft};
use store_core::{Order, OrderLine};
use store_db::{DbError, OrderWithLines};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub cashier_id: i64,
    /// (product, quantity) pairs. May be absent, which is an empty order.
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: i64,
    pub quantity: i64,
}

impl CreateOrderRequest {
    /// Converts the request into a core draft. Any caller-supplied paid date
    /// is not representable and therefore dropped here; orders are always
    /// created unpaid.
    fn into_draft(self) -> OrderDraft {
        OrderDraft {
            cashier_id: self.cashier_id,
            items: self
                .items
                .into_iter()
                .map(|item| LineDraft {
                    product_id: item.product_id,
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}

/// One persisted line item, echoed back to the client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemResponse {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

impl From<&OrderLine> for LineItemResponse {
    fn from(line: &OrderLine) -> Self {
        LineItemResponse {
            product_id: line.product_id,
            quantity: line.quantity,
            unit_price_cents: line.unit_price_cents,
            line_total_cents: line.line_total().cents(),
        }
    }
}

/// A created order, as returned from POST /orders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i64,
    pub cashier_id: i64,
    pub paid_on_date: Option<DateTime<Utc>>,
    pub total_cents: i64,
    pub items: Vec<LineItemResponse>,
}

impl From<OrderWithLines> for OrderResponse {
    fn from(created: OrderWithLines) -> Self {
        OrderResponse {
            id: created.order.id,
            cashier_id: created.order.cashier_id,
            paid_on_date: created.order.paid_on_date,
            total_cents: created.total().cents(),
            items: created.lines.iter().map(Into::into).collect(),
        }
    }
}

/// An order header, as returned from GET /orders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummaryResponse {
    pub id: i64,
    pub cashier_id: i64,
    pub paid_on_date: Option<DateTime<Utc>>,
}

impl From<Order> for OrderSummaryResponse {
    fn from(order: Order) -> Self {
        OrderSummaryResponse {
            id: order.id,
            cashier_id: order.cashier_id,
            paid_on_date: order.paid_on_date,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersParams {
    /// Calendar day (YYYY-MM-DD). Orders paid on that day match; an
    /// unparseable value is ignored and the full list returned.
    pub paid_on: Option<String>,
}

/// One line on the order detail view, with its resolved product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailItem {
    pub product: ProductResponse,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

/// Full order detail, as returned from GET /orders/{id}.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailResponse {
    pub id: i64,
    pub cashier: CashierResponse,
    pub paid_on_date: Option<DateTime<Utc>>,
    pub total_cents: i64,
    pub items: Vec<OrderDetailItem>,
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /orders
///
/// The order pricing & validation flow: the rejection chain short-circuits
/// (cashier → emptiness → products), the total is priced in integer cents,
/// and the order plus its lines land in one transaction. Rejections come back
/// as 400s carrying the reason; success is a 201 with the persisted order.
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    debug!(cashier_id = req.cashier_id, items = req.items.len(), "create_order");

    let created = state.db.orders().submit(&req.into_draft()).await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// GET /orders/{id}
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<OrderDetailResponse>, ApiError> {
    let Some(with_lines) = state.db.orders().get_with_lines(id).await? else {
        return Err(ApiError::not_found("Order", id));
    };

    // Resolve the graph: cashier, products, categories. The foreign keys
    // guarantee every lookup below succeeds.
    let cashier = state
        .db
        .cashiers()
        .get_by_id(with_lines.order.cashier_id)
        .await?
        .ok_or_else(|| {
            DbError::Internal(format!(
                "order {} references missing cashier {}",
                id, with_lines.order.cashier_id
            ))
        })?;

    let product_ids: Vec<i64> = with_lines.lines.iter().map(|l| l.product_id).collect();
    let products = state.db.products().get_many(&product_ids).await?;

    let category_ids: Vec<i64> = products.values().map(|p| p.category_id).collect();
    let categories = state.db.categories().get_many(&category_ids).await?;

    let total_cents = with_lines.total().cents();
    let mut items = Vec::with_capacity(with_lines.lines.len());
    for line in &with_lines.lines {
        let product = products.get(&line.product_id).cloned().ok_or_else(|| {
            DbError::Internal(format!(
                "order line {} references missing product {}",
                line.id, line.product_id
            ))
        })?;
        let category = categories.get(&product.category_id).cloned().ok_or_else(|| {
            DbError::Internal(format!(
                "product {} references missing category {}",
                product.id, product.category_id
            ))
        })?;

        items.push(OrderDetailItem {
            product: ProductResponse::from_parts(product, category),
            quantity: line.quantity,
            unit_price_cents: line.unit_price_cents,
            line_total_cents: line.line_total().cents(),
        });
    }

    Ok(Json(OrderDetailResponse {
        id: with_lines.order.id,
        cashier: cashier.into(),
        paid_on_date: with_lines.order.paid_on_date,
        total_cents,
        items,
    }))
}

/// GET /orders?paidOn=YYYY-MM-DD
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListOrdersParams>,
) -> Result<Json<Vec<OrderSummaryResponse>>, ApiError> {
    // An unparseable date is ignored, not an error.
    let paid_on = params
        .paid_on
        .as_deref()
        .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok());

    let orders = state.db.orders().list(paid_on).await?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

/// DELETE /orders/{id}
pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    debug!(id = id, "delete_order");

    state.db.orders().delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use store_db::{Database, DbConfig};

    async fn test_state() -> (Arc<AppState>, i64, i64, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let cashier = db.cashiers().insert("Jim", "Bob").await.unwrap();
        let dairy = db.categories().insert("Dairy").await.unwrap();
        let produce = db.categories().insert("Produce").await.unwrap();

        let milk = db
            .products()
            .insert("Almond Milk", "Silk", 250, dairy.id)
            .await
            .unwrap();
        let pork = db
            .products()
            .insert("Pork Tenderloin", "Butchers", 1000, produce.id)
            .await
            .unwrap();

        (Arc::new(AppState { db }), cashier.id, milk.id, pork.id)
    }

    #[tokio::test]
    async fn test_create_order_success() {
        let (state, cashier_id, milk_id, pork_id) = test_state().await;

        let req = CreateOrderRequest {
            cashier_id,
            items: vec![
                OrderItemRequest {
                    product_id: milk_id,
                    quantity: 3,
                },
                OrderItemRequest {
                    product_id: pork_id,
                    quantity: 1,
                },
            ],
        };

        let (status, Json(body)) = create_order(State(state), Json(req)).await.unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.total_cents, 1750);
        assert!(body.paid_on_date.is_none());
        assert_eq!(body.items.len(), 2);
        assert_eq!(body.items[0].line_total_cents, 750);
    }

    #[tokio::test]
    async fn test_create_order_unknown_cashier() {
        let (state, _, milk_id, _) = test_state().await;

        let req = CreateOrderRequest {
            cashier_id: 999,
            items: vec![OrderItemRequest {
                product_id: milk_id,
                quantity: 1,
            }],
        };

        let err = create_order(State(state), Json(req)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidOrder);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid cashier id");
    }

    #[tokio::test]
    async fn test_create_order_empty_items() {
        let (state, cashier_id, _, _) = test_state().await;

        let req = CreateOrderRequest {
            cashier_id,
            items: vec![],
        };

        let err = create_order(State(state), Json(req)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidOrder);
        assert_eq!(err.message, "Order must have at least one line item");
    }

    #[tokio::test]
    async fn test_create_order_invalid_product_named() {
        let (state, cashier_id, milk_id, _) = test_state().await;

        let req = CreateOrderRequest {
            cashier_id,
            items: vec![
                OrderItemRequest {
                    product_id: milk_id,
                    quantity: 1,
                },
                OrderItemRequest {
                    product_id: 777,
                    quantity: 2,
                },
            ],
        };

        let err = create_order(State(state.clone()), Json(req)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidOrder);
        assert_eq!(err.message, "Invalid product id: 777");

        // Nothing persisted
        let orders = state.db.orders().list(None).await.unwrap();
        assert!(orders.is_empty());
    }

    #[tokio::test]
    async fn test_create_order_bad_quantity_is_validation_error() {
        let (state, cashier_id, milk_id, _) = test_state().await;

        let req = CreateOrderRequest {
            cashier_id,
            items: vec![OrderItemRequest {
                product_id: milk_id,
                quantity: 0,
            }],
        };

        let err = create_order(State(state), Json(req)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_get_order_detail() {
        let (state, cashier_id, milk_id, _) = test_state().await;

        let req = CreateOrderRequest {
            cashier_id,
            items: vec![OrderItemRequest {
                product_id: milk_id,
                quantity: 3,
            }],
        };
        let (_, Json(created)) = create_order(State(state.clone()), Json(req)).await.unwrap();

        let Json(detail) = get_order(State(state.clone()), Path(created.id)).await.unwrap();

        assert_eq!(detail.id, created.id);
        assert_eq!(detail.cashier.full_name, "Jim Bob");
        assert_eq!(detail.total_cents, 750);
        assert_eq!(detail.items.len(), 1);
        assert_eq!(detail.items[0].product.name, "Almond Milk");
        assert_eq!(detail.items[0].product.category.name, "Dairy");

        let err = get_order(State(state), Path(999)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_orders_ignores_bad_date() {
        let (state, cashier_id, milk_id, _) = test_state().await;

        let req = CreateOrderRequest {
            cashier_id,
            items: vec![OrderItemRequest {
                product_id: milk_id,
                quantity: 1,
            }],
        };
        create_order(State(state.clone()), Json(req)).await.unwrap();

        // Valid filter day with no paid orders: empty
        let Json(none) = list_orders(
            State(state.clone()),
            Query(ListOrdersParams {
                paid_on: Some("2023-09-29".to_string()),
            }),
        )
        .await
        .unwrap();
        assert!(none.is_empty());

        // Unparseable filter: ignored, full list returned
        let Json(all) = list_orders(
            State(state),
            Query(ListOrdersParams {
                paid_on: Some("not-a-date".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_order() {
        let (state, cashier_id, milk_id, _) = test_state().await;

        let req = CreateOrderRequest {
            cashier_id,
            items: vec![OrderItemRequest {
                product_id: milk_id,
                quantity: 1,
            }],
        };
        let (_, Json(created)) = create_order(State(state.clone()), Json(req)).await.unwrap();

        let status = delete_order(State(state.clone()), Path(created.id))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let err = delete_order(State(state), Path(created.id)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
