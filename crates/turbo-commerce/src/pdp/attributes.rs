use serde::Serialize;

use crate::catalog::{Product, ProductAttribute};

/// One row of the product attribute table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeDisplay {
    pub name: String,
    pub slug: String,
    pub value: String,
    pub value_slug: String,
}

/// Product-level attributes with their chosen values, in attribute order.
///
/// Assignments pointing at unknown attributes or values are skipped.
pub fn product_attributes(product: &Product, attributes: &[ProductAttribute]) -> Vec<AttributeDisplay> {
    attributes
        .iter()
        .filter_map(|attribute| {
            let value_id = product.attributes.get(&attribute.id)?;
            let value = attribute.value(*value_id)?;
            Some(AttributeDisplay {
                name: attribute.name.clone(),
                slug: attribute.slug.clone(),
                value: value.name.clone(),
                value_slug: value.slug.clone(),
            })
        })
        .collect()
}
