//! Order placement and summary endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use common::{MenuId, Money, RestaurantId};
use serde::{Deserialize, Serialize};
use store::{NewOrder, OrderSummary, Store};

use crate::AppState;
use crate::error::ApiError;
use crate::extract::CurrentCustomer;

#[derive(Deserialize)]
pub struct PlaceOrderRequest {
    pub restaurant_id: RestaurantId,
    pub menu_id: MenuId,
    pub quantity: i64,
}

#[derive(Serialize)]
pub struct PlaceOrderResponse {
    pub message: &'static str,
    pub total: Money,
}

/// POST /orders — place an order for the authenticated customer.
///
/// The unit price is snapshotted at placement time; the returned total is
/// `price * quantity`.
#[tracing::instrument(skip(state, customer, req))]
pub async fn create<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    customer: CurrentCustomer,
    Json(req): Json<PlaceOrderRequest>,
) -> Result<Json<PlaceOrderResponse>, ApiError> {
    let quantity = u32::try_from(req.quantity)
        .ok()
        .filter(|q| *q > 0)
        .ok_or_else(|| ApiError::Validation("Quantity must be a positive integer".to_string()))?;

    let placed = state
        .store
        .place_order(NewOrder {
            customer_id: customer.0.customer_id,
            restaurant_id: req.restaurant_id,
            menu_id: req.menu_id,
            quantity,
        })
        .await?;

    metrics::counter!("orders_placed_total").increment(1);

    Ok(Json(PlaceOrderResponse {
        message: "Order success",
        total: placed.total,
    }))
}

/// GET /orders/summary — aggregate order totals for the authenticated
/// customer. Zero orders yields a zero total, not an empty body.
#[tracing::instrument(skip(state, customer))]
pub async fn summary<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    customer: CurrentCustomer,
) -> Result<Json<OrderSummary>, ApiError> {
    let summary = state.store.order_summary(customer.0.customer_id).await?;
    Ok(Json(summary))
}
