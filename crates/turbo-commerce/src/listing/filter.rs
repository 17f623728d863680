//! Category listing filter form.
//!
//! Query parameters:
//! - `sort_by`: a [`SortBy`] key such as `price` or `-updated_at`
//! - `price_min` / `price_max`: decimal amounts in the store currency
//! - `<attribute slug>`: repeated attribute value ids, ORed within an attribute
//!
//! A filter with errors matches nothing.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::sort::{SortBy, SortField};
use crate::cart::FormErrors;
use crate::catalog::{Product, ProductAttribute};
use crate::ids::{AttributeId, AttributeValueId};
use crate::money::{Currency, Money};

const SORT_BY: &str = "sort_by";
const PRICE_MIN: &str = "price_min";
const PRICE_MAX: &str = "price_max";

fn invalid_choice(value: &str) -> String {
    format!("Select a valid choice. {value} is not one of the available choices.")
}

/// A bound listing filter.
#[derive(Debug, Clone)]
pub struct ProductFilter {
    sort_raw: Option<String>,
    sort_by: Option<SortBy>,
    price_min_raw: Option<String>,
    price_max_raw: Option<String>,
    price_min: Option<Money>,
    price_max: Option<Money>,
    attributes: Vec<ProductAttribute>,
    selected: BTreeMap<AttributeId, BTreeSet<AttributeValueId>>,
    errors: FormErrors,
}

impl ProductFilter {
    /// Bind decoded query pairs against the attributes offered for filtering.
    pub fn bind<K, V>(
        params: impl IntoIterator<Item = (K, V)>,
        attributes: &[ProductAttribute],
        currency: Currency,
    ) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filter = Self {
            sort_raw: None,
            sort_by: None,
            price_min_raw: None,
            price_max_raw: None,
            price_min: None,
            price_max: None,
            attributes: attributes.to_vec(),
            selected: BTreeMap::new(),
            errors: FormErrors::default(),
        };

        for (key, value) in params {
            let (key, value) = (key.as_ref(), value.as_ref().trim());
            match key {
                SORT_BY => filter.sort_raw = Some(value.to_string()),
                PRICE_MIN => filter.price_min_raw = Some(value.to_string()),
                PRICE_MAX => filter.price_max_raw = Some(value.to_string()),
                _ => filter.bind_attribute(key, value),
            }
        }

        filter.clean_sort();
        filter.price_min = filter.clean_price(PRICE_MIN, filter.price_min_raw.clone(), currency);
        filter.price_max = filter.clean_price(PRICE_MAX, filter.price_max_raw.clone(), currency);
        filter
    }

    fn bind_attribute(&mut self, key: &str, value: &str) {
        let Some(attribute) = self.attributes.iter().find(|a| a.slug == key) else {
            return;
        };
        if value.is_empty() {
            return;
        }
        match value
            .parse::<AttributeValueId>()
            .ok()
            .filter(|id| attribute.value(*id).is_some())
        {
            Some(id) => {
                self.selected.entry(attribute.id).or_default().insert(id);
            }
            None => {
                let slug = attribute.slug.clone();
                self.errors.add(&slug, invalid_choice(value));
            }
        }
    }

    fn clean_sort(&mut self) {
        let Some(raw) = self.sort_raw.as_deref().filter(|s| !s.is_empty()) else {
            return;
        };
        match raw.parse::<SortBy>() {
            Ok(sort_by) => self.sort_by = Some(sort_by),
            Err(()) => {
                let message = invalid_choice(raw);
                self.errors.add(SORT_BY, message);
            }
        }
    }

    fn clean_price(&mut self, field: &str, raw: Option<String>, currency: Currency) -> Option<Money> {
        let raw = raw.filter(|s| !s.is_empty())?;
        match Money::from_decimal_str(&raw, currency) {
            Ok(money) => Some(money),
            Err(_) => {
                self.errors.add(field, "Enter a number.");
                None
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// The requested sort order, if any.
    pub fn sort_by(&self) -> Option<SortBy> {
        self.sort_by
    }

    /// Validated sort key without the direction prefix; `name` when unsorted
    /// or when `sort_by` did not validate.
    pub fn now_sorted_by(&self) -> String {
        self.sort_by
            .map_or(SortField::Name.key(), |sort_by| sort_by.field.key())
            .to_string()
    }

    /// Whether the raw sort parameter asks for descending order.
    pub fn is_descending(&self) -> bool {
        self.sort_raw
            .as_deref()
            .is_some_and(|s| s.starts_with('-'))
    }

    /// Whether a product passes the price and attribute filters.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(min) = &self.price_min {
            if product.price.amount_cents < min.amount_cents {
                return false;
            }
        }
        if let Some(max) = &self.price_max {
            if product.price.amount_cents > max.amount_cents {
                return false;
            }
        }
        self.selected.iter().all(|(attribute_id, wanted)| {
            let own = product.attributes.get(attribute_id);
            own.is_some_and(|value| wanted.contains(value))
                || product.variants.iter().any(|variant| {
                    variant
                        .attributes
                        .get(attribute_id)
                        .is_some_and(|value| wanted.contains(value))
                })
        })
    }

    /// Filter and order products. Input is expected in name order.
    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        if !self.is_valid() {
            return Vec::new();
        }
        let mut products: Vec<Product> = products.into_iter().filter(|p| self.matches(p)).collect();
        if let Some(sort_by) = self.sort_by {
            sort_by.sort(&mut products);
        }
        products
    }

    /// Values, choices and errors for rendering the filter sidebar.
    pub fn render_state(&self) -> FilterState {
        FilterState {
            sort_by: self.sort_raw.clone().unwrap_or_default(),
            price_min: self.price_min_raw.clone().unwrap_or_default(),
            price_max: self.price_max_raw.clone().unwrap_or_default(),
            attributes: self
                .attributes
                .iter()
                .map(|attribute| {
                    let selected = self.selected.get(&attribute.id);
                    AttributeFilterState {
                        name: attribute.name.clone(),
                        slug: attribute.slug.clone(),
                        choices: attribute
                            .values
                            .iter()
                            .map(|value| AttributeFilterChoice {
                                id: value.id,
                                name: value.name.clone(),
                                selected: selected.is_some_and(|s| s.contains(&value.id)),
                            })
                            .collect(),
                    }
                })
                .collect(),
            errors: self.errors.clone(),
            has_errors: !self.errors.is_empty(),
        }
    }
}

/// Template-facing snapshot of the filter form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterState {
    pub sort_by: String,
    pub price_min: String,
    pub price_max: String,
    pub attributes: Vec<AttributeFilterState>,
    pub errors: FormErrors,
    pub has_errors: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeFilterState {
    pub name: String,
    pub slug: String,
    pub choices: Vec<AttributeFilterChoice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeFilterChoice {
    pub id: AttributeValueId,
    pub name: String,
    pub selected: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductVariant;
    use crate::ids::{ProductId, VariantId};

    fn color() -> ProductAttribute {
        ProductAttribute::new(AttributeId::new(1), "Color", "color")
            .with_value(AttributeValueId::new(10), "Red", "red")
            .with_value(AttributeValueId::new(11), "Blue", "blue")
    }

    fn products() -> Vec<Product> {
        let mut apron = Product::new(ProductId::new(1), "Apron", Money::new(3000, Currency::USD));
        apron.attributes.insert(AttributeId::new(1), AttributeValueId::new(10));

        let mut boots = Product::new(ProductId::new(2), "Boots", Money::new(1000, Currency::USD));
        let mut blue = ProductVariant::new(VariantId::new(20), "BOOT-BLUE");
        blue.attributes.insert(AttributeId::new(1), AttributeValueId::new(11));
        boots.variants.push(blue);

        let cap = Product::new(ProductId::new(3), "Cap", Money::new(2000, Currency::USD));
        vec![apron, boots, cap]
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    fn bind(params: &[(&str, &str)]) -> ProductFilter {
        ProductFilter::bind(params.iter().copied(), &[color()], Currency::USD)
    }

    #[test]
    fn test_unbound_filter_keeps_name_order() {
        let filter = bind(&[]);
        assert!(filter.is_valid());
        assert_eq!(names(&filter.apply(products())), vec!["Apron", "Boots", "Cap"]);
        assert_eq!(filter.now_sorted_by(), "name");
        assert!(!filter.is_descending());
    }

    #[test]
    fn test_sort_descending_price() {
        let filter = bind(&[("sort_by", "-price")]);
        assert_eq!(filter.sort_by(), Some(SortBy::descending(SortField::Price)));
        assert_eq!(filter.now_sorted_by(), "price");
        assert!(filter.is_descending());
        assert_eq!(names(&filter.apply(products())), vec!["Apron", "Cap", "Boots"]);
    }

    #[test]
    fn test_unknown_sort_key_falls_back_to_name() {
        let filter = bind(&[("sort_by", "-bogus")]);
        assert!(!filter.is_valid());
        assert_eq!(filter.sort_by(), None);
        assert_eq!(filter.now_sorted_by(), "name");
    }

    #[test]
    fn test_price_range() {
        let filter = bind(&[("price_min", "15"), ("price_max", "25.00")]);
        assert_eq!(names(&filter.apply(products())), vec!["Cap"]);
    }

    #[test]
    fn test_attribute_matches_product_or_variant() {
        let filter = bind(&[("color", "10"), ("color", "11")]);
        assert_eq!(names(&filter.apply(products())), vec!["Apron", "Boots"]);

        let filter = bind(&[("color", "11")]);
        assert_eq!(names(&filter.apply(products())), vec!["Boots"]);
    }

    #[test]
    fn test_invalid_input_matches_nothing() {
        let filter = bind(&[("sort_by", "rating")]);
        assert!(!filter.is_valid());
        assert!(filter.errors().contains("sort_by"));
        assert!(filter.apply(products()).is_empty());
        assert_eq!(filter.now_sorted_by(), "rating");

        let filter = bind(&[("price_min", "cheap")]);
        assert_eq!(filter.errors().get("price_min"), ["Enter a number.".to_string()]);

        let filter = bind(&[("color", "99")]);
        assert!(filter.errors().contains("color"));
        assert!(filter.apply(products()).is_empty());
    }

    #[test]
    fn test_unknown_parameters_are_ignored() {
        let filter = bind(&[("page", "2"), ("utm_source", "mail")]);
        assert!(filter.is_valid());
        assert_eq!(filter.apply(products()).len(), 3);
    }

    #[test]
    fn test_render_state_marks_selected_choices() {
        let state = bind(&[("color", "11"), ("price_max", "20")]).render_state();
        assert_eq!(state.price_max, "20");
        let choices = &state.attributes[0].choices;
        assert!(!choices[0].selected);
        assert!(choices[1].selected);
        assert!(!state.has_errors);
    }
}
