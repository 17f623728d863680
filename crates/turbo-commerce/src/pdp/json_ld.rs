use chrono::NaiveDate;
use serde_json::{json, Value};

use super::AttributeDisplay;
use crate::catalog::Product;

/// schema.org `Product` description used by search engines.
///
/// Offers use undiscounted prices. A `brand` attribute wins over a
/// `publisher` attribute when both exist.
pub fn product_json_ld(
    product: &Product,
    today: NaiveDate,
    attributes: Option<&[AttributeDisplay]>,
) -> Value {
    let published = product.is_available_on(today);
    let offers: Vec<Value> = product
        .variants
        .iter()
        .map(|variant| {
            let price = variant.base_price(product);
            let availability = if published && variant.is_in_stock() {
                "http://schema.org/InStock"
            } else {
                "http://schema.org/OutOfStock"
            };
            json!({
                "@type": "Offer",
                "availability": availability,
                "itemCondition": "http://schema.org/NewCondition",
                "price": price.to_decimal_string(),
                "priceCurrency": price.currency.code(),
                "sku": variant.sku,
            })
        })
        .collect();

    let images: Vec<&str> = product
        .ordered_images()
        .into_iter()
        .map(|image| image.url.as_str())
        .collect();

    let mut data = json!({
        "@context": "http://schema.org/",
        "@type": "Product",
        "name": product.name,
        "image": images,
        "description": product.description,
        "offers": offers,
    });

    let brand = attributes.and_then(|rows| {
        rows.iter()
            .find(|row| row.slug == "brand")
            .or_else(|| rows.iter().find(|row| row.slug == "publisher"))
    });
    if let Some(brand) = brand {
        data["brand"] = json!({"@type": "Thing", "name": brand.value});
    }

    data
}
