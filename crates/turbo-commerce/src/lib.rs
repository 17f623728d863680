//! Storefront catalog domain for TurboCommerce.
//!
//! This crate holds the framework-free logic behind the storefront's product
//! pages:
//!
//! - **Catalog**: Products, variants, attributes, categories, visibility
//! - **Pricing**: Sales and the availability summary
//! - **Pdp**: Variant picker payload, attribute table, JSON-LD
//! - **Cart**: Cart lines and the add-to-cart form
//! - **Listing**: Category filters, sort orders, pagination
//!
//! # Example
//!
//! ```rust
//! use turbo_commerce::prelude::*;
//!
//! let mut product = Product::new(ProductId::new(1), "Rust Book", Money::new(4999, Currency::USD));
//! let mut hardcover = ProductVariant::new(VariantId::new(10), "BOOK-HC");
//! hardcover.quantity_available = 5;
//! product.variants.push(hardcover);
//!
//! let mut cart = Cart::new();
//! let data = AddToCartData::from_pairs([("quantity", "2")]);
//! let form = AddToCartForm::bind(&product, data, &cart, MAX_CART_LINE_QUANTITY);
//! assert!(form.is_valid());
//! form.save(&mut cart).unwrap();
//! assert_eq!(cart.quantity(), 2);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod cart;
pub mod listing;
pub mod pdp;
pub mod pricing;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, ExchangeRates, Money, PriceRange};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, ExchangeRates, Money, PriceRange};

    // Catalog
    pub use crate::catalog::{
        visible_products, Category, CategoryPath, CategoryTree, Product, ProductAttribute,
        ProductImage, ProductVariant, Viewer,
    };

    // Pricing
    pub use crate::pricing::{availability_for, LocalCurrency, ProductAvailability, Sale, SaleKind};

    // Cart
    pub use crate::cart::{AddToCartData, AddToCartForm, Cart, CartLine, FormErrors, MAX_CART_LINE_QUANTITY};

    // Listing
    pub use crate::listing::{Page, Paginator, ProductFilter, SortBy, SortField, PAGINATE_BY};
}
