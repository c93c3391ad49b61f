//! Application error type mapping to HTTP status codes and envelope format.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use botique_types::error::{CartError, CheckoutError, LedgerError};

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Cart store errors.
    Cart(CartError),
    /// Checkout transition errors.
    Checkout(CheckoutError),
    /// Order ledger errors.
    Ledger(LedgerError),
    /// Request validation error.
    Validation(String),
}

impl From<CartError> for AppError {
    fn from(e: CartError) -> Self {
        AppError::Cart(e)
    }
}

impl From<CheckoutError> for AppError {
    fn from(e: CheckoutError) -> Self {
        AppError::Checkout(e)
    }
}

impl From<LedgerError> for AppError {
    fn from(e: LedgerError) -> Self {
        AppError::Ledger(e)
    }
}

fn map_cart(err: &CartError) -> (StatusCode, &'static str, String) {
    match err {
        CartError::InvalidQuantity => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            err.to_string(),
        ),
        CartError::Persist(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "CART_PERSIST_FAILED",
            err.to_string(),
        ),
    }
}

fn map_ledger(err: &LedgerError) -> (StatusCode, &'static str, String) {
    match err {
        LedgerError::Connection(_) => (
            StatusCode::BAD_GATEWAY,
            "LEDGER_UNAVAILABLE",
            err.to_string(),
        ),
        LedgerError::Query(_) | LedgerError::Constraint(_) => {
            (StatusCode::BAD_GATEWAY, "LEDGER_ERROR", err.to_string())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Cart(err) => map_cart(err),
            AppError::Checkout(CheckoutError::EmptyCart) => (
                StatusCode::CONFLICT,
                "EMPTY_CART",
                "Cart is empty, nothing to check out".to_string(),
            ),
            AppError::Checkout(CheckoutError::Cart(err)) => map_cart(err),
            AppError::Checkout(CheckoutError::Ledger(err)) => map_ledger(err),
            AppError::Ledger(err) => map_ledger(err),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
        };

        (status, Json(ApiResponse::error(code, &message))).into_response()
    }
}
