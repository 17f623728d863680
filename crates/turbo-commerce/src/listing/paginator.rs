//! Page slicing for listings.

use serde::Serialize;

use crate::error::CommerceError;

/// One page of results. Page numbers are 1-indexed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Current page.
    pub number: usize,
    pub per_page: usize,
    /// Total number of items across all pages.
    pub count: usize,
    pub num_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
    pub next_page_number: Option<usize>,
    pub previous_page_number: Option<usize>,
}

/// Splits an ordered list into pages of `per_page` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    per_page: usize,
}

impl Paginator {
    pub fn new(per_page: usize) -> Self {
        Self {
            per_page: per_page.max(1),
        }
    }

    /// Number of pages for `count` items. An empty list still has one page.
    pub fn num_pages(&self, count: usize) -> usize {
        count.div_ceil(self.per_page).max(1)
    }

    /// Resolve the raw `page` query value into a page.
    ///
    /// A missing or blank value means page 1. Anything that is not a
    /// positive integer within range fails with `InvalidPage`.
    pub fn page<T>(&self, items: Vec<T>, raw: Option<&str>) -> Result<Page<T>, CommerceError> {
        let raw = raw.map(str::trim).filter(|s| !s.is_empty());
        let number = match raw {
            None => 1,
            Some(value) => value
                .parse::<usize>()
                .map_err(|_| CommerceError::InvalidPage(value.to_string()))?,
        };

        let count = items.len();
        let num_pages = self.num_pages(count);
        if number == 0 || number > num_pages {
            return Err(CommerceError::InvalidPage(number.to_string()));
        }

        let start = (number - 1) * self.per_page;
        let items: Vec<T> = items.into_iter().skip(start).take(self.per_page).collect();

        Ok(Page {
            items,
            number,
            per_page: self.per_page,
            count,
            num_pages,
            has_next: number < num_pages,
            has_previous: number > 1,
            next_page_number: (number < num_pages).then_some(number + 1),
            previous_page_number: (number > 1).then(|| number - 1),
        })
    }
}
