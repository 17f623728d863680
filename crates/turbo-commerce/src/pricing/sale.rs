//! Catalog sales: automatic discounts applied to product prices.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::ids::{CategoryId, ProductId, SaleId};
use crate::money::Money;

/// How a sale reduces a price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SaleKind {
    /// Percentage off (0.0 - 100.0).
    Percentage(f64),
    /// Fixed amount off each unit.
    Fixed(Money),
}

impl SaleKind {
    /// Apply to a unit price. Never goes below zero.
    pub fn apply(&self, price: Money) -> Money {
        match self {
            SaleKind::Percentage(percent) => {
                let percent = percent.clamp(0.0, 100.0);
                price.saturating_sub_to_zero(&price.percentage(percent))
            }
            SaleKind::Fixed(amount) => price.saturating_sub_to_zero(amount),
        }
    }
}

/// A sale targeting products directly or through their categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sale {
    pub id: SaleId,
    pub name: String,
    pub kind: SaleKind,
    #[serde(default)]
    pub products: Vec<ProductId>,
    #[serde(default)]
    pub categories: Vec<CategoryId>,
    /// First day of the sale. `None` means already running.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Last day of the sale (inclusive). `None` means open-ended.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl Sale {
    pub fn new(id: SaleId, name: impl Into<String>, kind: SaleKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            products: Vec::new(),
            categories: Vec::new(),
            start_date: None,
            end_date: None,
        }
    }

    pub fn for_product(mut self, product_id: ProductId) -> Self {
        self.products.push(product_id);
        self
    }

    pub fn for_category(mut self, category_id: CategoryId) -> Self {
        self.categories.push(category_id);
        self
    }

    pub fn between(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Check if the sale runs on the given day.
    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        self.start_date.map_or(true, |start| start <= today)
            && self.end_date.map_or(true, |end| today <= end)
    }

    /// Check if the sale covers the product on the given day.
    pub fn applies_to(&self, product: &Product, today: NaiveDate) -> bool {
        self.is_active_on(today)
            && (self.products.contains(&product.id)
                || product.category_ids.iter().any(|c| self.categories.contains(c)))
    }
}

/// Lowest price reachable with any single applicable sale.
pub fn best_price(price: Money, product: &Product, sales: &[Sale], today: NaiveDate) -> Money {
    sales
        .iter()
        .filter(|sale| sale.applies_to(product, today))
        .map(|sale| sale.kind.apply(price))
        .chain(std::iter::once(price))
        .min_by_key(|candidate| candidate.amount_cents)
        .unwrap_or(price)
}

/// Sales running on the given day.
pub fn active_sales(sales: impl IntoIterator<Item = Sale>, today: NaiveDate) -> Vec<Sale> {
    sales
        .into_iter()
        .filter(|sale| sale.is_active_on(today))
        .collect()
}
