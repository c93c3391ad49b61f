//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Cart keeping
        .route(
            "/carts/{user_id}",
            get(handlers::cart::get_cart)
                .put(handlers::cart::set_cart)
                .delete(handlers::cart::clear_cart),
        )
        .route("/carts/{user_id}/items", post(handlers::cart::add_item))
        // Checkout and history
        .route(
            "/carts/{user_id}/checkout",
            post(handlers::checkout::checkout),
        )
        .route(
            "/users/{user_id}/orders",
            get(handlers::checkout::list_orders),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
