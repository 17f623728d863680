//! Which products a given viewer may see.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::ids::UserId;

/// The person making a storefront request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Viewer {
    /// No authenticated user; carts are tracked by cookie.
    #[default]
    Anonymous,
    /// A signed-in customer.
    Customer(UserId),
    /// A signed-in staff member, allowed to preview unpublished products.
    Staff(UserId),
}

impl Viewer {
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Viewer::Anonymous)
    }

    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Viewer::Anonymous => None,
            Viewer::Customer(id) | Viewer::Staff(id) => Some(*id),
        }
    }

    pub fn is_staff(&self) -> bool {
        matches!(self, Viewer::Staff(_))
    }

    /// Whether this viewer may open the given product.
    pub fn can_see(&self, product: &Product, today: NaiveDate) -> bool {
        self.is_staff() || product.is_available_on(today)
    }
}

/// Filter a product list down to what the viewer may see.
pub fn visible_products(
    viewer: &Viewer,
    products: impl IntoIterator<Item = Product>,
    today: NaiveDate,
) -> Vec<Product> {
    products
        .into_iter()
        .filter(|product| viewer.can_see(product, today))
        .collect()
}
