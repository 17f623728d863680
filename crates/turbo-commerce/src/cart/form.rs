//! Add-to-cart form: binds submitted fields to a product and validates them
//! against the shopper's cart.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::catalog::{Product, ProductVariant};
use crate::error::CommerceError;
use crate::ids::VariantId;

/// Key used for errors not tied to a single field.
pub const NON_FIELD_ERRORS: &str = "__all__";

const REQUIRED: &str = "This field is required.";
const INVALID_CHOICE: &str = "Select a valid choice. That choice is not one of the available choices.";
const VARIANT_DOES_NOT_EXIST: &str = "Oops. We could not find that product.";
const EMPTY_STOCK: &str = "Sorry. This product is currently out of stock.";

/// Raw submitted fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AddToCartData {
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub variant: Option<String>,
}

impl AddToCartData {
    /// Collect fields from decoded `key=value` pairs. The last value wins.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut data = Self::default();
        for (key, value) in pairs {
            match key.as_ref() {
                "quantity" => data.quantity = Some(value.into()),
                "variant" => data.variant = Some(value.into()),
                _ => {}
            }
        }
        data
    }
}

/// Validation errors keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[], Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }
}

/// A line ready to be stored.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CleanedLine {
    variant_id: VariantId,
    quantity: i64,
}

/// The add-to-cart form of one product.
#[derive(Debug, Clone)]
pub struct AddToCartForm<'a> {
    product: &'a Product,
    data: Option<AddToCartData>,
    max_quantity: i64,
    errors: FormErrors,
    cleaned: Option<CleanedLine>,
}

impl<'a> AddToCartForm<'a> {
    /// A form with nothing submitted, as shown on a fresh detail page.
    pub fn unbound(product: &'a Product, max_quantity: i64) -> Self {
        Self {
            product,
            data: None,
            max_quantity,
            errors: FormErrors::default(),
            cleaned: None,
        }
    }

    /// Bind submitted data and validate it against the cart's current lines.
    pub fn bind(product: &'a Product, data: AddToCartData, cart: &Cart, max_quantity: i64) -> Self {
        let mut form = Self {
            product,
            data: Some(data),
            max_quantity,
            errors: FormErrors::default(),
            cleaned: None,
        };
        form.cleaned = form.clean(cart);
        form
    }

    pub fn is_bound(&self) -> bool {
        self.data.is_some()
    }

    pub fn is_valid(&self) -> bool {
        self.is_bound() && self.errors.is_empty() && self.cleaned.is_some()
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Store the validated line in the cart.
    pub fn save(&self, cart: &mut Cart) -> Result<i64, CommerceError> {
        let line = self
            .cleaned
            .filter(|_| self.errors.is_empty())
            .ok_or_else(|| CommerceError::ProductNotFound(self.product.id.to_string()))?;
        cart.add(line.variant_id, self.product.id, line.quantity, self.max_quantity)
    }

    fn clean(&mut self, cart: &Cart) -> Option<CleanedLine> {
        let data = self.data.clone().unwrap_or_default();
        let quantity = self.clean_quantity(data.quantity.as_deref());
        let variant = self.clean_variant(data.variant.as_deref());

        let quantity = quantity?;
        let Some(variant) = variant else {
            if self.product.variants.is_empty() {
                self.errors.add(NON_FIELD_ERRORS, VARIANT_DOES_NOT_EXIST);
            }
            return None;
        };

        let used = cart.line(variant.id).map_or(0, |line| line.quantity);
        let new_quantity = used.saturating_add(quantity);
        if new_quantity > self.max_quantity {
            self.errors
                .add("quantity", format!("Maximum quantity is {}.", self.max_quantity));
            return None;
        }
        if !variant.is_in_stock() {
            self.errors.add("quantity", EMPTY_STOCK);
            return None;
        }
        if new_quantity > variant.quantity_available {
            self.errors.add(
                "quantity",
                format!("Only {} remaining in stock.", variant.quantity_available),
            );
            return None;
        }

        Some(CleanedLine {
            variant_id: variant.id,
            quantity,
        })
    }

    fn clean_quantity(&mut self, raw: Option<&str>) -> Option<i64> {
        let raw = raw.map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            self.errors.add("quantity", REQUIRED);
            return None;
        }
        let Ok(quantity) = raw.parse::<i64>() else {
            self.errors.add("quantity", "Enter a whole number.");
            return None;
        };
        if quantity < 1 {
            self.errors
                .add("quantity", "Ensure this value is greater than or equal to 1.");
            return None;
        }
        if quantity > self.max_quantity {
            self.errors.add(
                "quantity",
                format!(
                    "Ensure this value is less than or equal to {}.",
                    self.max_quantity
                ),
            );
            return None;
        }
        Some(quantity)
    }

    fn clean_variant(&mut self, raw: Option<&str>) -> Option<&'a ProductVariant> {
        let product = self.product;
        let raw = raw.map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            // Single-variant products do not render a variant selector.
            if let [only] = product.variants.as_slice() {
                return Some(only);
            }
            if !product.variants.is_empty() {
                self.errors.add("variant", REQUIRED);
            }
            return None;
        }
        let variant = raw
            .parse::<VariantId>()
            .ok()
            .and_then(|id| product.variant(id));
        if variant.is_none() {
            self.errors.add("variant", INVALID_CHOICE);
        }
        variant
    }

    /// Values, choices and errors for rendering the form.
    pub fn render_state(&self) -> FormState {
        let data = self.data.clone().unwrap_or_default();
        let selected = data
            .variant
            .as_deref()
            .and_then(|raw| raw.trim().parse::<VariantId>().ok());

        FormState {
            quantity: data.quantity.unwrap_or_else(|| "1".to_string()),
            show_variant_select: self.product.variants.len() > 1,
            variant_choices: self
                .product
                .variants
                .iter()
                .map(|variant| VariantChoice {
                    id: variant.id,
                    label: variant.display_name(),
                    selected: Some(variant.id) == selected,
                    in_stock: variant.is_in_stock(),
                })
                .collect(),
            quantity_errors: self.errors.get("quantity").to_vec(),
            variant_errors: self.errors.get("variant").to_vec(),
            non_field_errors: self.errors.get(NON_FIELD_ERRORS).to_vec(),
            has_errors: !self.errors.is_empty(),
        }
    }
}

/// Template-facing snapshot of the form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormState {
    pub quantity: String,
    pub show_variant_select: bool,
    pub variant_choices: Vec<VariantChoice>,
    pub quantity_errors: Vec<String>,
    pub variant_errors: Vec<String>,
    pub non_field_errors: Vec<String>,
    pub has_errors: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantChoice {
    pub id: VariantId,
    pub label: String,
    pub selected: bool,
    pub in_stock: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use crate::money::{Currency, Money};

    fn product(stocks: &[i64]) -> Product {
        let mut product = Product::new(ProductId::new(1), "Tee", Money::new(1000, Currency::USD));
        for (i, stock) in stocks.iter().enumerate() {
            let mut variant = ProductVariant::new(VariantId::new(i as i64 + 1), format!("TEE-{i}"));
            variant.quantity_available = *stock;
            product.variants.push(variant);
        }
        product
    }

    fn data(quantity: &str, variant: Option<&str>) -> AddToCartData {
        AddToCartData {
            quantity: Some(quantity.to_string()),
            variant: variant.map(str::to_string),
        }
    }

    #[test]
    fn test_valid_form_saves_line() {
        let product = product(&[10, 10]);
        let mut cart = Cart::new();
        let form = AddToCartForm::bind(&product, data("2", Some("2")), &cart, 50);

        assert!(form.is_valid());
        assert_eq!(form.save(&mut cart).unwrap(), 2);
        assert_eq!(cart.line(VariantId::new(2)).unwrap().quantity, 2);
    }

    #[test]
    fn test_single_variant_defaults() {
        let product = product(&[5]);
        let cart = Cart::new();
        let form = AddToCartForm::bind(&product, data("1", None), &cart, 50);
        assert!(form.is_valid());
    }

    #[test]
    fn test_missing_fields() {
        let product = product(&[5, 5]);
        let form = AddToCartForm::bind(&product, AddToCartData::default(), &Cart::new(), 50);

        assert!(!form.is_valid());
        assert_eq!(form.errors().get("quantity"), [REQUIRED.to_string()]);
        assert_eq!(form.errors().get("variant"), [REQUIRED.to_string()]);
    }

    #[test]
    fn test_quantity_bounds() {
        let product = product(&[100]);
        let cart = Cart::new();

        let form = AddToCartForm::bind(&product, data("abc", None), &cart, 50);
        assert_eq!(form.errors().get("quantity"), ["Enter a whole number.".to_string()]);

        let form = AddToCartForm::bind(&product, data("0", None), &cart, 50);
        assert!(form.errors().contains("quantity"));

        let form = AddToCartForm::bind(&product, data("51", None), &cart, 50);
        assert_eq!(
            form.errors().get("quantity"),
            ["Ensure this value is less than or equal to 50.".to_string()]
        );
    }

    #[test]
    fn test_unknown_variant_is_invalid_choice() {
        let product = product(&[5, 5]);
        let form = AddToCartForm::bind(&product, data("1", Some("99")), &Cart::new(), 50);
        assert_eq!(form.errors().get("variant"), [INVALID_CHOICE.to_string()]);
    }

    #[test]
    fn test_existing_line_counts_toward_maximum() {
        let product = product(&[100]);
        let mut cart = Cart::new();
        cart.add(VariantId::new(1), product.id, 45, 50).unwrap();

        let form = AddToCartForm::bind(&product, data("6", None), &cart, 50);
        assert_eq!(form.errors().get("quantity"), ["Maximum quantity is 50.".to_string()]);
    }

    #[test]
    fn test_stock_checks() {
        let product = product(&[0, 3]);
        let cart = Cart::new();

        let form = AddToCartForm::bind(&product, data("1", Some("1")), &cart, 50);
        assert_eq!(form.errors().get("quantity"), [EMPTY_STOCK.to_string()]);

        let form = AddToCartForm::bind(&product, data("4", Some("2")), &cart, 50);
        assert_eq!(
            form.errors().get("quantity"),
            ["Only 3 remaining in stock.".to_string()]
        );
    }

    #[test]
    fn test_product_without_variants() {
        let product = product(&[]);
        let form = AddToCartForm::bind(&product, data("1", None), &Cart::new(), 50);
        assert_eq!(
            form.errors().get(NON_FIELD_ERRORS),
            [VARIANT_DOES_NOT_EXIST.to_string()]
        );
    }

    #[test]
    fn test_errors_serialize_by_field() {
        let product = product(&[5, 5]);
        let form = AddToCartForm::bind(&product, data("", Some("2")), &Cart::new(), 50);
        let json = serde_json::to_value(form.errors()).unwrap();
        assert_eq!(json, serde_json::json!({"quantity": [REQUIRED]}));
    }

    #[test]
    fn test_render_state_keeps_submitted_values() {
        let product = product(&[5, 5]);
        let form = AddToCartForm::bind(&product, data("7", Some("2")), &Cart::new(), 50);
        let state = form.render_state();

        assert_eq!(state.quantity, "7");
        assert!(state.show_variant_select);
        assert!(state.variant_choices[1].selected);
        assert!(!state.variant_choices[0].selected);
        assert!(state.has_errors);
        assert_eq!(state.quantity_errors, vec!["Only 5 remaining in stock.".to_string()]);

        let unbound = AddToCartForm::unbound(&product, 50).render_state();
        assert_eq!(unbound.quantity, "1");
        assert!(!unbound.has_errors);
    }
}
