//! Product catalog module.
//!
//! Contains types for products, variants, attributes, categories and the
//! visibility rules applied per viewer.

mod attribute;
mod category;
mod product;
mod visibility;

pub use attribute::{AttributeChoiceValue, ProductAttribute};
pub use category::{Category, CategoryPath, CategoryTree};
pub use product::{slugify, AttributeAssignments, Product, ProductImage, ProductVariant};
pub use visibility::{visible_products, Viewer};
