//! Router assembly.

use axum::routing::{any, get};
use axum::Router;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::handlers::{self, cart, category, product};
use crate::state::AppState;

/// Build the storefront router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/products/{product}/", get(product::product_details))
        .route("/products/{product}/add/", any(product::product_add_to_cart))
        .route("/products/category/{*path}", get(category::category_index))
        .route("/cart/", get(cart::cart_index))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
