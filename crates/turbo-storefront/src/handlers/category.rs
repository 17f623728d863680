//! Category listing page.

use std::collections::HashSet;

use axum::extract::{Path, RawQuery, State};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{debug, warn};
use turbo_commerce::catalog::{visible_products, Product, ProductAttribute};
use turbo_commerce::listing::{sort_by_choices, FilterState, Paginator, ProductFilter, SortChoice};
use turbo_commerce::pricing::availability_for;
use turbo_commerce::AttributeId;

use super::{permanent_redirect, todays_sales};
use crate::context::RequestContext;
use crate::error::{StorefrontError, StorefrontResult};
use crate::state::AppState;
use crate::templates::CATEGORY_INDEX;
use crate::urls;
use crate::views::{CategoryView, PaginationView, ProductCard};

#[derive(Serialize)]
struct CategoryIndexContext<'a> {
    page_title: &'a str,
    category: CategoryView,
    filter: FilterState,
    products: Vec<ProductCard>,
    products_paginated: PaginationView,
    sort_by_choices: Vec<SortChoice>,
    now_sorted_by: String,
    is_descending: bool,
}

/// Attributes worth offering as filters: those used by at least one
/// product or variant in the listing.
fn filterable_attributes(attributes: Vec<ProductAttribute>, products: &[Product]) -> Vec<ProductAttribute> {
    let used: HashSet<AttributeId> = products
        .iter()
        .flat_map(|product| {
            product
                .attributes
                .keys()
                .chain(product.variants.iter().flat_map(|v| v.attributes.keys()))
                .copied()
        })
        .collect();
    attributes.into_iter().filter(|a| used.contains(&a.id)).collect()
}

/// `GET /products/category/{path}-{id}/`
pub async fn category_index(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(tail): Path<String>,
    RawQuery(query): RawQuery,
) -> StorefrontResult<Response> {
    let (path, category_id) = urls::parse_category_tail(&tail)
        .ok_or_else(|| StorefrontError::not_found(format!("category path {tail}")))?;
    let category = state
        .catalog
        .category_path(category_id)
        .await?
        .ok_or_else(|| StorefrontError::not_found(format!("category {category_id}")))?;

    let actual_path = category.full_path();
    if path != actual_path {
        let location = urls::category_url(&category);
        warn!(category_id = %category_id, requested = path, %location, "stale category path");
        return Ok(permanent_redirect(&location));
    }

    let query: Vec<(String, String)> =
        url::form_urlencoded::parse(query.as_deref().unwrap_or_default().as_bytes())
            .into_owned()
            .collect();
    let page_param = query
        .iter()
        .rev()
        .find(|(key, _)| key == "page")
        .map(|(_, value)| value.as_str());

    let products = state.catalog.products_in_category(category_id).await?;
    let mut products = visible_products(&ctx.viewer, products, ctx.today);
    products.sort_by(|a, b| a.name.cmp(&b.name));

    let attributes = filterable_attributes(state.catalog.attributes().await?, &products);
    let filter = ProductFilter::bind(
        query.iter().map(|(key, value)| (key.as_str(), value.as_str())),
        &attributes,
        state.settings.currency,
    );
    if !filter.is_valid() {
        debug!(category_id = %category_id, errors = ?filter.errors(), "invalid listing filter");
    }

    let page = Paginator::new(state.settings.paginate_by).page(filter.apply(products), page_param)?;
    let pagination = PaginationView::new(&page, &query);

    let sales = todays_sales(&state, &ctx).await?;
    let local = ctx.local_currency(&state.settings.exchange_rates);
    let cards: Vec<ProductCard> = page
        .items
        .iter()
        .map(|product| ProductCard::new(product, &availability_for(product, &sales, ctx.today, local)))
        .collect();

    let context = CategoryIndexContext {
        page_title: &category.category.name,
        category: CategoryView::from(&category),
        filter: filter.render_state(),
        products: cards,
        products_paginated: pagination,
        sort_by_choices: sort_by_choices(),
        now_sorted_by: filter.now_sorted_by(),
        is_descending: filter.is_descending(),
    };
    Ok(state.templates.render(CATEGORY_INDEX, &context)?.into_response())
}
