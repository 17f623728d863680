//! Product detail page and add-to-cart submission.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, warn};
use turbo_commerce::cart::{AddToCartData, AddToCartForm, FormState};
use turbo_commerce::catalog::{Product, ProductImage};
use turbo_commerce::pdp::{
    product_attributes, product_json_ld, show_variant_picker, to_script_json, variant_picker_data,
    AttributeDisplay,
};
use turbo_commerce::pricing::availability_for;
use turbo_commerce::ProductId;

use super::cart::{cart_cookie, cart_token};
use super::{permanent_redirect, redirect, todays_sales};
use crate::cart_store::get_or_create_cart;
use crate::context::RequestContext;
use crate::error::{StorefrontError, StorefrontResult};
use crate::state::AppState;
use crate::templates::PRODUCT_DETAILS;
use crate::urls;
use crate::views::{AvailabilityView, ProductView};

#[derive(Serialize)]
struct ProductDetailsContext<'a> {
    page_title: &'a str,
    is_visible: bool,
    form: FormState,
    form_action: String,
    availability: AvailabilityView,
    product: ProductView,
    product_attributes: Vec<AttributeDisplay>,
    product_images: Vec<&'a ProductImage>,
    show_variant_picker: bool,
    variant_picker_data: String,
    json_ld_product_data: String,
}

fn parse_segment(segment: &str) -> StorefrontResult<(&str, ProductId)> {
    urls::parse_product_segment(segment)
        .ok_or_else(|| StorefrontError::not_found(format!("product path {segment}")))
}

/// Load a product the viewer is allowed to see.
async fn visible_product(
    state: &AppState,
    ctx: &RequestContext,
    id: ProductId,
) -> StorefrontResult<Product> {
    state
        .catalog
        .product(id)
        .await?
        .filter(|product| ctx.viewer.can_see(product, ctx.today))
        .ok_or_else(|| StorefrontError::not_found(format!("product {id}")))
}

/// Render the detail page around a bound or unbound form.
async fn render_product_details(
    state: &AppState,
    ctx: &RequestContext,
    product: &Product,
    form: &AddToCartForm<'_>,
) -> StorefrontResult<Html<String>> {
    let sales = todays_sales(state, ctx).await?;
    let attributes = state.catalog.attributes().await?;
    let local = ctx.local_currency(&state.settings.exchange_rates);

    let availability = availability_for(product, &sales, ctx.today, local);
    let rows = product_attributes(product, &attributes);
    let picker = variant_picker_data(product, &attributes, &sales, ctx.today, local);
    let json_ld = product_json_ld(product, ctx.today, Some(rows.as_slice()));
    let view = ProductView::from(product);

    let context = ProductDetailsContext {
        page_title: &product.name,
        is_visible: product.is_available_on(ctx.today),
        form: form.render_state(),
        form_action: view.add_to_cart_url.clone(),
        availability: AvailabilityView::from(&availability),
        product: view,
        product_attributes: rows,
        product_images: product.ordered_images(),
        show_variant_picker: show_variant_picker(product),
        variant_picker_data: to_script_json(&picker)?,
        json_ld_product_data: to_script_json(&json_ld)?,
    };
    state.templates.render(PRODUCT_DETAILS, &context)
}

/// `GET /products/{slug}-{id}/`
pub async fn product_details(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(segment): Path<String>,
) -> StorefrontResult<Response> {
    let (slug, product_id) = parse_segment(&segment)?;
    let product = visible_product(&state, &ctx, product_id).await?;

    if product.canonical_slug() != slug {
        let location = urls::product_url(&product);
        warn!(product_id = %product.id, requested = slug, %location, "stale product slug");
        return Ok(permanent_redirect(&location));
    }

    let form = AddToCartForm::unbound(&product, state.settings.max_cart_line_quantity);
    Ok(render_product_details(&state, &ctx, &product, &form)
        .await?
        .into_response())
}

/// `POST /products/{slug}-{id}/add/`
///
/// Other methods are sent back to the detail page.
pub async fn product_add_to_cart(
    State(state): State<AppState>,
    ctx: RequestContext,
    method: Method,
    jar: SignedCookieJar,
    Path(segment): Path<String>,
    body: Bytes,
) -> StorefrontResult<Response> {
    let (slug, product_id) = parse_segment(&segment)?;
    if method != Method::POST {
        debug!(%method, product_id = %product_id, "add to cart without POST");
        return Ok(redirect(&urls::product_details(slug, product_id)));
    }

    let product = visible_product(&state, &ctx, product_id).await?;
    let token = cart_token(&jar, &state.settings);
    let mut cart = get_or_create_cart(state.carts.as_ref(), &ctx.viewer, token).await?;

    let data = AddToCartData::from_pairs(url::form_urlencoded::parse(&body));
    let form = AddToCartForm::bind(&product, data, &cart, state.settings.max_cart_line_quantity);

    let response = if form.is_valid() {
        let quantity = form.save(&mut cart)?;
        state.carts.save(&cart).await?;
        info!(cart = %cart.token, product_id = %product.id, line_quantity = quantity, "added to cart");

        if ctx.is_ajax {
            Json(json!({"next": urls::CART_URL})).into_response()
        } else {
            redirect(urls::CART_URL)
        }
    } else if ctx.is_ajax {
        debug!(product_id = %product.id, errors = ?form.errors(), "add to cart rejected");
        (StatusCode::BAD_REQUEST, Json(json!({"error": form.errors()}))).into_response()
    } else {
        debug!(product_id = %product.id, errors = ?form.errors(), "add to cart rejected");
        render_product_details(&state, &ctx, &product, &form)
            .await?
            .into_response()
    };

    if ctx.viewer.is_authenticated() {
        return Ok(response);
    }
    let jar = jar.add(cart_cookie(&state.settings, cart.token));
    Ok((jar, response).into_response())
}
