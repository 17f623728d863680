//! Pricing module.
//!
//! Sales (automatic catalog discounts) and the availability summary shown on
//! product pages and listings.

mod availability;
mod sale;

pub use availability::{availability_for, LocalCurrency, ProductAvailability};
pub use sale::{active_sales, best_price, Sale, SaleKind};
