//! HTTP handlers.

pub mod cart;
pub mod category;
pub mod product;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::debug;
use turbo_commerce::pricing::{active_sales, Sale};

use crate::context::RequestContext;
use crate::error::{StorefrontError, StorefrontResult};
use crate::state::AppState;

/// `301 Moved Permanently` to a canonical URL.
pub(crate) fn permanent_redirect(location: &str) -> Response {
    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location.to_string())]).into_response()
}

/// `302 Found`.
pub(crate) fn redirect(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Sales running today.
pub(crate) async fn todays_sales(state: &AppState, ctx: &RequestContext) -> StorefrontResult<Vec<Sale>> {
    let sales = active_sales(state.catalog.sales().await?, ctx.today);
    debug!(today = %ctx.today, active = sales.len(), "loaded sales");
    Ok(sales)
}

/// Liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}

/// Fallback for unmatched routes.
pub async fn not_found() -> StorefrontError {
    StorefrontError::not_found("route")
}
