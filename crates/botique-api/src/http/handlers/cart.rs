//! Cart handlers for the REST API.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use botique_core::cart::store::CartStore;
use botique_types::cart::{Cart, LineItem, UserId};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// One cart line in API responses, with its computed line total.
#[derive(Debug, Serialize)]
pub struct CartLineView {
    pub code: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: i64,
    pub line_total: i64,
}

/// A cart in API responses.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub total: i64,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .map(|line| CartLineView {
                    code: line.code.clone(),
                    name: line.name.clone(),
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                    line_total: line.line_total(),
                })
                .collect(),
            total: cart.total(),
        }
    }
}

/// Item payload accepted by `PUT /carts/{user_id}` and
/// `POST /carts/{user_id}/items`.
#[derive(Debug, Deserialize)]
pub struct ItemPayload {
    pub code: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: i64,
}

impl From<ItemPayload> for LineItem {
    fn from(item: ItemPayload) -> Self {
        LineItem::new(item.code, item.name, item.quantity, item.unit_price)
    }
}

/// Body for `PUT /carts/{user_id}`.
#[derive(Debug, Deserialize)]
pub struct SetCartRequest {
    pub items: Vec<ItemPayload>,
}

/// Reject zero quantities at the boundary, before the store sees them.
fn validate_quantity(quantity: u32) -> Result<(), AppError> {
    if quantity == 0 {
        return Err(AppError::Validation(
            "quantity must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

/// GET /api/v1/carts/{user_id} - The user's current cart.
pub async fn get_cart(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<ApiResponse<CartView>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let cart = state.checkout.carts().get_cart(UserId::new(user_id)).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(CartView::from(&cart), request_id, elapsed)
        .with_link("self", &format!("/api/v1/carts/{user_id}"));
    Ok(Json(resp))
}

/// PUT /api/v1/carts/{user_id} - Replace the user's entire cart.
pub async fn set_cart(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(body): Json<SetCartRequest>,
) -> Result<Json<ApiResponse<CartView>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    for item in &body.items {
        validate_quantity(item.quantity)?;
    }

    let user = UserId::new(user_id);
    let items: Vec<LineItem> = body.items.into_iter().map(LineItem::from).collect();
    state.checkout.carts().set_cart(user, items).await?;

    let cart = state.checkout.carts().get_cart(user).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(CartView::from(&cart), request_id, elapsed)
        .with_link("self", &format!("/api/v1/carts/{user_id}"));
    Ok(Json(resp))
}

/// DELETE /api/v1/carts/{user_id} - Empty the user's cart.
pub async fn clear_cart(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<ApiResponse<CartView>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let user = UserId::new(user_id);
    state.checkout.carts().clear_cart(user).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(CartView::from(&Cart::new()), request_id, elapsed)
        .with_link("self", &format!("/api/v1/carts/{user_id}"));
    Ok(Json(resp))
}

/// POST /api/v1/carts/{user_id}/items - Add an item to the user's cart.
pub async fn add_item(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(body): Json<ItemPayload>,
) -> Result<Json<ApiResponse<CartView>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    validate_quantity(body.quantity)?;

    let user = UserId::new(user_id);
    state
        .checkout
        .carts()
        .add_item(user, LineItem::from(body))
        .await?;

    let cart = state.checkout.carts().get_cart(user).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(CartView::from(&cart), request_id, elapsed)
        .with_link("self", &format!("/api/v1/carts/{user_id}"))
        .with_link("checkout", &format!("/api/v1/carts/{user_id}/checkout"));
    Ok(Json(resp))
}
