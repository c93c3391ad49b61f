//! Checkout and order history handlers for the REST API.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use botique_types::cart::UserId;
use botique_types::order::{OrderRecord, UserProfile};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Payload returned by a successful checkout.
#[derive(Debug, Serialize)]
pub struct CheckoutView {
    pub order_id: i64,
}

/// POST /api/v1/carts/{user_id}/checkout - Convert the cart into an order.
///
/// The body carries the buyer's chat profile, recorded in the ledger on
/// their first order. Responds 409 when the cart is empty and 502 when
/// the ledger cannot take the order; in both cases the cart is untouched.
pub async fn checkout(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<ApiResponse<CheckoutView>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let order_id = state
        .checkout
        .checkout(UserId::new(user_id), &profile)
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(CheckoutView { order_id: order_id.0 }, request_id, elapsed)
        .with_link("orders", &format!("/api/v1/users/{user_id}/orders"));
    Ok(Json(resp))
}

/// GET /api/v1/users/{user_id}/orders - Committed orders, newest first.
pub async fn list_orders(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<OrderRecord>>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let orders = state.checkout.order_history(UserId::new(user_id)).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(orders, request_id, elapsed)
        .with_link("self", &format!("/api/v1/users/{user_id}/orders"));
    Ok(Json(resp))
}
