//! Product detail page data.
//!
//! Builders for the structures the detail template and its client-side
//! scripts consume: attribute tables, the variant picker payload and the
//! schema.org JSON-LD block. Money is always emitted as decimal strings.

mod attributes;
mod json_ld;
mod variant_picker;

use serde::Serialize;

use crate::error::CommerceError;
use crate::money::{Money, PriceRange};

pub use attributes::{product_attributes, AttributeDisplay};
pub use json_ld::product_json_ld;
pub use variant_picker::{
    show_variant_picker, variant_picker_data, PickerAttribute, PickerAttributeValue,
    OfferSchema, PickerAvailability, PickerVariant, VariantPickerData,
};

/// JSON shape of a single price.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceJson {
    pub currency: String,
    pub gross: String,
    pub gross_localized: String,
    pub net: String,
    pub net_localized: String,
}

impl From<&Money> for PriceJson {
    fn from(money: &Money) -> Self {
        // Catalog prices carry no tax component, so net equals gross.
        let amount = money.to_decimal_string();
        let localized = money.display();
        Self {
            currency: money.currency.code().to_string(),
            gross: amount.clone(),
            gross_localized: localized.clone(),
            net: amount,
            net_localized: localized,
        }
    }
}

/// JSON shape of a price range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeJson {
    pub max_price: PriceJson,
    pub min_price: PriceJson,
}

impl From<&PriceRange> for PriceRangeJson {
    fn from(range: &PriceRange) -> Self {
        Self {
            max_price: PriceJson::from(&range.max_price),
            min_price: PriceJson::from(&range.min_price),
        }
    }
}

/// Serialize to JSON that can be embedded verbatim in a `<script>` element
/// or an HTML attribute.
pub fn to_script_json<T: Serialize>(value: &T) -> Result<String, CommerceError> {
    let json = serde_json::to_string(value)?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}
