//! Product attributes (brand, size, color, ...) and their allowed values.

use serde::{Deserialize, Serialize};

use crate::ids::{AttributeId, AttributeValueId};

/// An attribute with its list of allowed values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductAttribute {
    pub id: AttributeId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub values: Vec<AttributeChoiceValue>,
}

/// One allowed value of an attribute (e.g., "Large" for "Size").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttributeChoiceValue {
    pub id: AttributeValueId,
    pub name: String,
    pub slug: String,
}

impl ProductAttribute {
    pub fn new(id: AttributeId, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            slug: slug.into(),
            values: Vec::new(),
        }
    }

    /// Builder-style helper to append an allowed value.
    pub fn with_value(
        mut self,
        id: AttributeValueId,
        name: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        self.values.push(AttributeChoiceValue {
            id,
            name: name.into(),
            slug: slug.into(),
        });
        self
    }

    pub fn value(&self, id: AttributeValueId) -> Option<&AttributeChoiceValue> {
        self.values.iter().find(|v| v.id == id)
    }
}
