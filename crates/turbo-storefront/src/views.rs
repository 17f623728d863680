//! Template-facing shapes.
//!
//! Domain values are flattened into display strings and URLs so templates
//! stay free of formatting logic.

use serde::Serialize;
use turbo_commerce::catalog::{CategoryPath, Product};
use turbo_commerce::listing::Page;
use turbo_commerce::pricing::ProductAvailability;
use turbo_commerce::{CategoryId, Money, PriceRange, ProductId};

use crate::urls;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRangeView {
    pub min: String,
    pub max: String,
    pub is_range: bool,
}

impl From<&PriceRange> for PriceRangeView {
    fn from(range: &PriceRange) -> Self {
        Self {
            min: range.min_price.display(),
            max: range.max_price.display(),
            is_range: !range.is_single_price(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailabilityView {
    pub available: bool,
    pub on_sale: bool,
    pub price_range: PriceRangeView,
    pub price_range_undiscounted: PriceRangeView,
    pub discount: Option<String>,
    pub price_range_local_currency: Option<PriceRangeView>,
    pub discount_local_currency: Option<String>,
}

impl From<&ProductAvailability> for AvailabilityView {
    fn from(availability: &ProductAvailability) -> Self {
        Self {
            available: availability.available,
            on_sale: availability.on_sale,
            price_range: PriceRangeView::from(&availability.price_range),
            price_range_undiscounted: PriceRangeView::from(&availability.price_range_undiscounted),
            discount: availability.discount.as_ref().map(Money::display),
            price_range_local_currency: availability
                .price_range_local_currency
                .as_ref()
                .map(PriceRangeView::from),
            discount_local_currency: availability.discount_local_currency.as_ref().map(Money::display),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub url: String,
    pub add_to_cart_url: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        let slug = product.canonical_slug();
        Self {
            id: product.id,
            name: product.name.clone(),
            url: urls::product_details(&slug, product.id),
            add_to_cart_url: urls::product_add_to_cart(&slug, product.id),
            description: product.description.clone(),
            slug,
        }
    }
}

/// A product tile on a listing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub product: ProductView,
    pub availability: AvailabilityView,
    pub image: Option<String>,
}

impl ProductCard {
    pub fn new(product: &Product, availability: &ProductAvailability) -> Self {
        Self {
            product: ProductView::from(product),
            availability: AvailabilityView::from(availability),
            image: product.ordered_images().first().map(|image| image.url.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryLink {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub url: String,
    /// Root first.
    pub ancestors: Vec<CategoryLink>,
}

impl From<&CategoryPath> for CategoryView {
    fn from(path: &CategoryPath) -> Self {
        let ancestors = path
            .ancestors
            .iter()
            .enumerate()
            .map(|(depth, ancestor)| {
                let ancestor_path = CategoryPath {
                    category: ancestor.clone(),
                    ancestors: path.ancestors[..depth].to_vec(),
                };
                CategoryLink {
                    name: ancestor.name.clone(),
                    url: urls::category_url(&ancestor_path),
                }
            })
            .collect();

        Self {
            id: path.category.id,
            name: path.category.name.clone(),
            slug: path.category.slug.clone(),
            description: path.category.description.clone(),
            url: urls::category_url(path),
            ancestors,
        }
    }
}

/// Page metadata with links that keep the current filters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationView {
    pub number: usize,
    pub num_pages: usize,
    pub count: usize,
    pub has_next: bool,
    pub has_previous: bool,
    pub next_url: Option<String>,
    pub previous_url: Option<String>,
}

impl PaginationView {
    /// `query` holds the decoded request parameters; any `page` entry is replaced.
    pub fn new<T>(page: &Page<T>, query: &[(String, String)]) -> Self {
        Self {
            number: page.number,
            num_pages: page.num_pages,
            count: page.count,
            has_next: page.has_next,
            has_previous: page.has_previous,
            next_url: page.next_page_number.map(|n| page_url(query, n)),
            previous_url: page.previous_page_number.map(|n| page_url(query, n)),
        }
    }
}

fn page_url(query: &[(String, String)], page: usize) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in query.iter().filter(|(key, _)| key != "page") {
        serializer.append_pair(key, value);
    }
    serializer.append_pair("page", &page.to_string());
    format!("?{}", serializer.finish())
}

/// A line on the cart page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLineView {
    pub product_name: String,
    pub product_url: String,
    pub variant_name: String,
    pub quantity: i64,
}
