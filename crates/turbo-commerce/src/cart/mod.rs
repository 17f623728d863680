//! Shopping cart module.
//!
//! Contains the cart, its lines, and the add-to-cart form.

mod cart;
mod form;

pub use cart::{Cart, CartLine, MAX_CART_LINE_QUANTITY};
pub use form::{AddToCartData, AddToCartForm, FormErrors, FormState, VariantChoice, NON_FIELD_ERRORS};
