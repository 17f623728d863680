//! Display-time availability and pricing summary for a product.

use chrono::NaiveDate;
use serde::Serialize;

use crate::catalog::Product;
use crate::money::{Currency, ExchangeRates, Money, PriceRange};
use crate::pricing::Sale;

/// The shopper's local currency together with the rates to reach it.
#[derive(Debug, Clone, Copy)]
pub struct LocalCurrency<'a> {
    pub currency: Currency,
    pub rates: &'a ExchangeRates,
}

impl<'a> LocalCurrency<'a> {
    pub fn new(currency: Currency, rates: &'a ExchangeRates) -> Self {
        Self { currency, rates }
    }

    pub fn convert(&self, money: &Money) -> Option<Money> {
        self.rates.convert(money, self.currency)
    }

    pub fn convert_range(&self, range: &PriceRange) -> Option<PriceRange> {
        self.rates.convert_range(range, self.currency)
    }
}

/// Pricing and availability of a product as shown to shoppers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductAvailability {
    /// In stock and published today.
    pub available: bool,
    /// Published today and cheaper than usual.
    pub on_sale: bool,
    /// Price range including all sales.
    pub price_range: PriceRange,
    /// Price range excluding all sales.
    pub price_range_undiscounted: PriceRange,
    /// Savings on the cheapest variant, when there are any.
    pub discount: Option<Money>,
    /// `price_range` in the shopper's currency, when it differs and a rate is known.
    pub price_range_local_currency: Option<PriceRange>,
    pub discount_local_currency: Option<Money>,
}

/// Compute the availability summary of a product.
pub fn availability_for(
    product: &Product,
    sales: &[Sale],
    today: NaiveDate,
    local: Option<LocalCurrency<'_>>,
) -> ProductAvailability {
    let price_range = product.price_range(sales, today);
    let undiscounted = product.undiscounted_price_range();
    let discount = positive_difference(&undiscounted.min_price, &price_range.min_price);

    let (price_range_local_currency, discount_local_currency) = match local {
        Some(local) => {
            let range_local = local.convert_range(&price_range);
            let undiscounted_local = local.convert_range(&undiscounted);
            let discount_local = match (&undiscounted_local, &range_local) {
                (Some(undiscounted), Some(range)) => {
                    positive_difference(&undiscounted.min_price, &range.min_price)
                }
                _ => None,
            };
            (range_local, discount_local)
        }
        None => (None, None),
    };

    let published = product.is_available_on(today);
    ProductAvailability {
        available: published && product.is_in_stock(),
        on_sale: published && discount.is_some(),
        price_range,
        price_range_undiscounted: undiscounted,
        discount,
        price_range_local_currency,
        discount_local_currency,
    }
}

fn positive_difference(higher: &Money, lower: &Money) -> Option<Money> {
    higher
        .try_subtract(lower)
        .filter(|difference| difference.amount_cents > 0)
}
