//! Product and variant types.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AttributeId, AttributeValueId, CategoryId, ImageId, ProductId, VariantId};
use crate::money::{Money, PriceRange};
use crate::pricing::{best_price, Sale};

/// Attribute assignments keyed by attribute, holding the chosen value.
pub type AttributeAssignments = BTreeMap<AttributeId, AttributeValueId>;

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// URL-friendly slug. Derived from the name when empty.
    #[serde(default)]
    pub slug: String,
    /// Full description (may contain HTML/markdown).
    #[serde(default)]
    pub description: String,
    /// First day the product is published. `None` means always.
    #[serde(default)]
    pub available_on: Option<NaiveDate>,
    /// Base price, used by variants without an override.
    pub price: Money,
    /// Product-level attribute values (e.g., brand).
    #[serde(default)]
    pub attributes: AttributeAssignments,
    /// Purchasable variants.
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    /// Images in display order.
    #[serde(default)]
    pub images: Vec<ProductImage>,
    /// Categories this product belongs to.
    #[serde(default)]
    pub category_ids: Vec<CategoryId>,
    /// Last modification time.
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Create a new product with no variants.
    pub fn new(id: ProductId, name: impl Into<String>, price: Money) -> Self {
        let name = name.into();
        Self {
            id,
            slug: slugify(&name),
            name,
            description: String::new(),
            available_on: None,
            price,
            attributes: BTreeMap::new(),
            variants: Vec::new(),
            images: Vec::new(),
            category_ids: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// The slug used in canonical URLs.
    pub fn canonical_slug(&self) -> String {
        if self.slug.is_empty() {
            slugify(&self.name)
        } else {
            self.slug.clone()
        }
    }

    /// Whether the product is published on the given day.
    pub fn is_available_on(&self, today: NaiveDate) -> bool {
        self.available_on.map_or(true, |date| date <= today)
    }

    /// Whether any variant can currently be bought.
    pub fn is_in_stock(&self) -> bool {
        self.variants.iter().any(ProductVariant::is_in_stock)
    }

    pub fn belongs_to(&self, category_id: CategoryId) -> bool {
        self.category_ids.contains(&category_id)
    }

    pub fn variant(&self, id: VariantId) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| v.id == id)
    }

    /// Images sorted by their display order.
    pub fn ordered_images(&self) -> Vec<&ProductImage> {
        let mut images: Vec<&ProductImage> = self.images.iter().collect();
        images.sort_by_key(|image| (image.sort_order, image.id));
        images
    }

    /// Price range across variants, with the best applicable sale applied.
    ///
    /// Products without variants fall back to their base price.
    pub fn price_range(&self, sales: &[Sale], today: NaiveDate) -> PriceRange {
        let prices = self
            .variants
            .iter()
            .map(|variant| variant.price_per_item(self, sales, today));
        PriceRange::from_prices(prices).unwrap_or_else(|| {
            let price = best_price(self.price, self, sales, today);
            PriceRange::new(price, price)
        })
    }

    /// Price range ignoring every sale.
    pub fn undiscounted_price_range(&self) -> PriceRange {
        self.price_range(&[], NaiveDate::MIN)
    }

    /// Add a category to this product.
    pub fn add_category(&mut self, category_id: CategoryId) {
        if !self.category_ids.contains(&category_id) {
            self.category_ids.push(category_id);
        }
    }
}

/// A product variant (e.g., size/color combination).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductVariant {
    /// Unique variant identifier.
    pub id: VariantId,
    /// Stock keeping unit for this variant (unique).
    pub sku: String,
    /// Variant name (e.g., "Large / Blue").
    #[serde(default)]
    pub name: String,
    /// Replaces the product's base price when set.
    #[serde(default)]
    pub price_override: Option<Money>,
    /// Variant attribute values driving the variant picker.
    #[serde(default)]
    pub attributes: AttributeAssignments,
    /// Units that can still be sold.
    #[serde(default)]
    pub quantity_available: i64,
}

impl ProductVariant {
    /// Create a new variant without attributes.
    pub fn new(id: VariantId, sku: impl Into<String>) -> Self {
        Self {
            id,
            sku: sku.into(),
            name: String::new(),
            price_override: None,
            attributes: BTreeMap::new(),
            quantity_available: 0,
        }
    }

    pub fn is_in_stock(&self) -> bool {
        self.quantity_available > 0
    }

    /// Price before any sale.
    pub fn base_price(&self, product: &Product) -> Money {
        self.price_override.unwrap_or(product.price)
    }

    /// Price of one unit after the best applicable sale.
    pub fn price_per_item(&self, product: &Product, sales: &[Sale], today: NaiveDate) -> Money {
        best_price(self.base_price(product), product, sales, today)
    }

    /// Label shown in the variant choice list.
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            self.sku.clone()
        } else {
            self.name.clone()
        }
    }
}

/// A product image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductImage {
    pub id: ImageId,
    /// URL to the image file.
    pub url: String,
    /// Alt text for accessibility.
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub sort_order: i32,
}

/// Lowercase the input and join alphanumeric runs with single dashes.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    for c in input.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() || c == '_' {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;
    use crate::pricing::SaleKind;
    use crate::ids::SaleId;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn shirt() -> Product {
        let mut product = Product::new(ProductId::new(1), "Blue Shirt", Money::new(2000, Currency::USD));
        let mut small = ProductVariant::new(VariantId::new(10), "SHIRT-S");
        small.quantity_available = 3;
        let mut large = ProductVariant::new(VariantId::new(11), "SHIRT-L");
        large.price_override = Some(Money::new(2500, Currency::USD));
        product.variants = vec![small, large];
        product
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Blue Shirt"), "blue-shirt");
        assert_eq!(slugify("  Rust & Go!  "), "rust-go");
        assert_eq!(slugify("snake_case"), "snake_case");
    }

    #[test]
    fn test_canonical_slug_falls_back_to_name() {
        let mut product = shirt();
        assert_eq!(product.canonical_slug(), "blue-shirt");
        product.slug = String::new();
        assert_eq!(product.canonical_slug(), "blue-shirt");
        product.slug = "custom".to_string();
        assert_eq!(product.canonical_slug(), "custom");
    }

    #[test]
    fn test_availability_window() {
        let mut product = shirt();
        assert!(product.is_available_on(day("2020-01-01")));

        product.available_on = Some(day("2030-06-01"));
        assert!(!product.is_available_on(day("2030-05-31")));
        assert!(product.is_available_on(day("2030-06-01")));
    }

    #[test]
    fn test_in_stock_when_any_variant_has_quantity() {
        let mut product = shirt();
        assert!(product.is_in_stock());
        product.variants[0].quantity_available = 0;
        assert!(!product.is_in_stock());
    }

    #[test]
    fn test_price_range_uses_overrides() {
        let product = shirt();
        let range = product.undiscounted_price_range();
        assert_eq!(range.min_price.amount_cents, 2000);
        assert_eq!(range.max_price.amount_cents, 2500);
    }

    #[test]
    fn test_price_range_without_variants_uses_base_price() {
        let product = Product::new(ProductId::new(2), "Mug", Money::new(900, Currency::USD));
        let range = product.undiscounted_price_range();
        assert!(range.is_single_price());
        assert_eq!(range.min_price.amount_cents, 900);
    }

    #[test]
    fn test_price_range_applies_sales() {
        let product = shirt();
        let sale = Sale::new(SaleId::new(1), "Ten off", SaleKind::Percentage(10.0))
            .for_product(product.id);
        let range = product.price_range(&[sale], day("2024-01-01"));
        assert_eq!(range.min_price.amount_cents, 1800);
        assert_eq!(range.max_price.amount_cents, 2250);
    }
}
