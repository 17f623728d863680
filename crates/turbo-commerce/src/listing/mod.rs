//! Category listing support.
//!
//! Contains the filter form, sort orders, and pagination used by
//! category pages.

mod filter;
mod paginator;
mod sort;

pub use filter::{AttributeFilterChoice, AttributeFilterState, FilterState, ProductFilter};
pub use paginator::{Page, Paginator};
pub use sort::{sort_by_choices, SortBy, SortChoice, SortField};

/// Products shown per listing page unless configured otherwise.
pub const PAGINATE_BY: usize = 16;
