//! Sort orders for product listings.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::catalog::Product;

/// Field a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Name,
    Price,
    UpdatedAt,
}

impl SortField {
    pub const ALL: [SortField; 3] = [SortField::Name, SortField::Price, SortField::UpdatedAt];

    /// Query-string key.
    pub fn key(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Price => "price",
            SortField::UpdatedAt => "updated_at",
        }
    }

    /// Human label shown in the sort menu.
    pub fn label(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Price => "price",
            SortField::UpdatedAt => "last updated",
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortField::Name => a.name.cmp(&b.name),
            SortField::Price => a.price.amount_cents.cmp(&b.price.amount_cents),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

impl FromStr for SortField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or(())
    }
}

/// A sort order, written `name` or `-name` in query strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortBy {
    pub field: SortField,
    pub descending: bool,
}

impl SortBy {
    pub fn ascending(field: SortField) -> Self {
        Self { field, descending: false }
    }

    pub fn descending(field: SortField) -> Self {
        Self { field, descending: true }
    }

    /// Stable sort, so ties keep their incoming (name) order.
    pub fn sort(&self, products: &mut [Product]) {
        products.sort_by(|a, b| {
            let ordering = self.field.compare(a, b);
            if self.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }
}

impl FromStr for SortBy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix('-') {
            Some(key) => key.parse().map(SortBy::descending),
            None => s.parse().map(SortBy::ascending),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            f.write_str("-")?;
        }
        f.write_str(self.field.key())
    }
}

/// One entry of the sort menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortChoice {
    pub value: &'static str,
    pub label: &'static str,
}

/// Ascending sort keys with their lowercase labels.
pub fn sort_by_choices() -> Vec<SortChoice> {
    SortField::ALL
        .iter()
        .map(|field| SortChoice {
            value: field.key(),
            label: field.label(),
        })
        .collect()
}
