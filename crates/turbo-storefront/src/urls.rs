//! URL building and parsing for storefront routes.
//!
//! Products live at `/products/{slug}-{id}/` and categories at
//! `/products/category/{path}-{id}/`, where `path` is the slash-joined slug
//! chain from the root category.

use turbo_commerce::catalog::{CategoryPath, Product};
use turbo_commerce::{CategoryId, ProductId};

pub const CART_URL: &str = "/cart/";

pub fn product_details(slug: &str, id: ProductId) -> String {
    format!("/products/{slug}-{id}/")
}

pub fn product_add_to_cart(slug: &str, id: ProductId) -> String {
    format!("/products/{slug}-{id}/add/")
}

/// Canonical detail URL of a product.
pub fn product_url(product: &Product) -> String {
    product_details(&product.canonical_slug(), product.id)
}

/// Canonical listing URL of a category.
pub fn category_url(path: &CategoryPath) -> String {
    category_index(&path.full_path(), path.category.id)
}

pub fn category_index(path: &str, id: CategoryId) -> String {
    format!("/products/category/{path}-{id}/")
}

fn is_slug_char(c: char, allow_slash: bool) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_' || (allow_slash && c == '/')
}

/// Split a `{slug}-{id}` segment at its last dash.
fn split_slug_id(segment: &str, allow_slash: bool) -> Option<(&str, i64)> {
    let (slug, id) = segment.rsplit_once('-')?;
    if slug.is_empty() || id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if !slug.chars().all(|c| is_slug_char(c, allow_slash)) {
        return None;
    }
    Some((slug, id.parse().ok()?))
}

/// Parse the product segment of `/products/{slug}-{id}/`.
pub fn parse_product_segment(segment: &str) -> Option<(&str, ProductId)> {
    split_slug_id(segment, false).map(|(slug, id)| (slug, ProductId::new(id)))
}

/// Parse the wildcard tail of `/products/category/...`, which must end in `/`.
pub fn parse_category_tail(tail: &str) -> Option<(&str, CategoryId)> {
    let tail = tail.trim_start_matches('/').strip_suffix('/')?;
    split_slug_id(tail, true).map(|(path, id)| (path, CategoryId::new(id)))
}
