//! Cart summary page and the cart cookie.

use axum::extract::State;
use axum::response::Html;
use axum_extra::extract::cookie::{Cookie, SignedCookieJar};
use serde::Serialize;
use turbo_commerce::CartToken;

use crate::config::{Settings, MAX_COOKIE_MAX_AGE_DAYS};
use crate::context::RequestContext;
use crate::error::StorefrontResult;
use crate::state::AppState;
use crate::templates::CART_INDEX;
use crate::urls;
use crate::views::CartLineView;

#[derive(Serialize)]
struct CartIndexContext {
    page_title: &'static str,
    lines: Vec<CartLineView>,
    quantity: i64,
}

/// Token from a validly signed cart cookie.
pub(crate) fn cart_token(jar: &SignedCookieJar, settings: &Settings) -> Option<CartToken> {
    jar.get(&settings.cart_cookie_name)
        .and_then(|cookie| cookie.value().parse().ok())
}

/// Long-lived cookie carrying an anonymous cart's token.
///
/// The lifetime is clamped to `1..=MAX_COOKIE_MAX_AGE_DAYS` days.
pub(crate) fn cart_cookie(settings: &Settings, token: CartToken) -> Cookie<'static> {
    let days = settings
        .cart_cookie_max_age_days
        .clamp(1, MAX_COOKIE_MAX_AGE_DAYS);
    Cookie::build((settings.cart_cookie_name.clone(), token.to_string()))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::days(days))
        .build()
}

/// `GET /cart/`
///
/// Read-only: a visit never creates a cart.
pub async fn cart_index(
    State(state): State<AppState>,
    ctx: RequestContext,
    jar: SignedCookieJar,
) -> StorefrontResult<Html<String>> {
    let cart = match (ctx.viewer.user_id(), cart_token(&jar, &state.settings)) {
        (Some(user_id), _) => state.carts.find_for_user(user_id).await?,
        (None, Some(token)) => state.carts.find_by_token(token).await?,
        (None, None) => None,
    };

    let mut lines = Vec::new();
    let mut quantity = 0;
    if let Some(cart) = &cart {
        quantity = cart.quantity();
        for line in &cart.lines {
            let Some(product) = state.catalog.product(line.product_id).await? else {
                continue;
            };
            lines.push(CartLineView {
                product_url: urls::product_url(&product),
                variant_name: product
                    .variant(line.variant_id)
                    .map(|variant| variant.display_name())
                    .unwrap_or_default(),
                product_name: product.name,
                quantity: line.quantity,
            });
        }
    }

    state.templates.render(
        CART_INDEX,
        &CartIndexContext {
            page_title: "Your cart",
            lines,
            quantity,
        },
    )
}
