use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;

use super::{PriceJson, PriceRangeJson};
use crate::catalog::{AttributeAssignments, Product, ProductAttribute};
use crate::ids::{AttributeId, AttributeValueId, VariantId};
use crate::pricing::{availability_for, LocalCurrency, Sale};

const SCHEMA_IN_STOCK: &str = "http://schema.org/InStock";
const SCHEMA_OUT_OF_STOCK: &str = "http://schema.org/OutOfStock";
const SCHEMA_NEW_CONDITION: &str = "http://schema.org/NewCondition";

/// Payload consumed by the client-side variant picker.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantPickerData {
    pub variants: Vec<PickerVariant>,
    pub variant_attributes: Vec<PickerAttribute>,
    pub availability: PickerAvailability,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickerVariant {
    pub id: VariantId,
    /// Whether the variant is in stock.
    pub availability: bool,
    pub price: PriceJson,
    pub price_undiscounted: PriceJson,
    pub price_local_currency: Option<PriceJson>,
    pub attributes: AttributeAssignments,
    pub schema_data: OfferSchema,
}

/// schema.org `Offer` describing one variant.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferSchema {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub item_condition: &'static str,
    pub price_currency: String,
    pub price: String,
    pub availability: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PickerAttribute {
    pub pk: AttributeId,
    pub name: String,
    pub slug: String,
    pub values: Vec<PickerAttributeValue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PickerAttributeValue {
    pub pk: AttributeValueId,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickerAvailability {
    pub discount: Option<PriceJson>,
    pub price_range: PriceRangeJson,
    pub price_range_undiscounted: PriceRangeJson,
    pub price_range_local_currency: Option<PriceRangeJson>,
}

/// The picker is only useful when every variant is described by attributes.
pub fn show_variant_picker(product: &Product) -> bool {
    product.variants.iter().all(|v| !v.attributes.is_empty())
}

/// Build the variant picker payload.
///
/// `variant_attributes` lists only attributes used by at least one variant,
/// restricted to the values some variant actually uses.
pub fn variant_picker_data(
    product: &Product,
    attributes: &[ProductAttribute],
    sales: &[Sale],
    today: NaiveDate,
    local: Option<LocalCurrency<'_>>,
) -> VariantPickerData {
    let availability = availability_for(product, sales, today, local);
    let mut used_values: BTreeMap<AttributeId, BTreeSet<AttributeValueId>> = BTreeMap::new();

    let variants: Vec<PickerVariant> = product
        .variants
        .iter()
        .map(|variant| {
            let price = variant.price_per_item(product, sales, today);
            let price_undiscounted = variant.base_price(product);
            let in_stock = variant.is_in_stock();

            for (attribute_id, value_id) in &variant.attributes {
                used_values.entry(*attribute_id).or_default().insert(*value_id);
            }

            PickerVariant {
                id: variant.id,
                availability: in_stock,
                price: PriceJson::from(&price),
                price_undiscounted: PriceJson::from(&price_undiscounted),
                price_local_currency: local
                    .and_then(|local| local.convert(&price))
                    .map(|converted| PriceJson::from(&converted)),
                attributes: variant.attributes.clone(),
                schema_data: OfferSchema {
                    kind: "Offer",
                    item_condition: SCHEMA_NEW_CONDITION,
                    price_currency: price.currency.code().to_string(),
                    price: price.to_decimal_string(),
                    availability: if in_stock {
                        SCHEMA_IN_STOCK
                    } else {
                        SCHEMA_OUT_OF_STOCK
                    },
                },
            }
        })
        .collect();

    let variant_attributes: Vec<PickerAttribute> = attributes
        .iter()
        .filter_map(|attribute| {
            let used = used_values.get(&attribute.id)?;
            Some(PickerAttribute {
                pk: attribute.id,
                name: attribute.name.clone(),
                slug: attribute.slug.clone(),
                values: attribute
                    .values
                    .iter()
                    .filter(|value| used.contains(&value.id))
                    .map(|value| PickerAttributeValue {
                        pk: value.id,
                        name: value.name.clone(),
                        slug: value.slug.clone(),
                    })
                    .collect(),
            })
        })
        .collect();

    VariantPickerData {
        variants,
        variant_attributes,
        availability: PickerAvailability {
            discount: availability.discount.as_ref().map(PriceJson::from),
            price_range: PriceRangeJson::from(&availability.price_range),
            price_range_undiscounted: PriceRangeJson::from(&availability.price_range_undiscounted),
            price_range_local_currency: availability
                .price_range_local_currency
                .as_ref()
                .map(PriceRangeJson::from),
        },
    }
}
