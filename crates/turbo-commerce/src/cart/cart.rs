//! Cart and line item types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::{CartToken, ProductId, UserId, VariantId};

/// Default maximum quantity of a single cart line.
pub const MAX_CART_LINE_QUANTITY: i64 = 50;

/// A shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Token handed to anonymous sessions.
    pub token: CartToken,
    /// Owner for authenticated carts.
    pub user_id: Option<UserId>,
    /// Items in the cart.
    pub lines: Vec<CartLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Create a new anonymous cart.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            token: CartToken::generate(),
            user_id: None,
            lines: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a cart owned by an authenticated user.
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::new()
        }
    }

    /// Add units of a variant, merging with an existing line.
    ///
    /// Returns the line's new quantity. Fails when quantity is not positive,
    /// the line would exceed `max_quantity`, or arithmetic overflows.
    pub fn add(
        &mut self,
        variant_id: VariantId,
        product_id: ProductId,
        quantity: i64,
        max_quantity: i64,
    ) -> Result<i64, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        let current = self.line(variant_id).map_or(0, |line| line.quantity);
        let new_quantity = current
            .checked_add(quantity)
            .ok_or(CommerceError::Overflow)?;
        if new_quantity > max_quantity {
            return Err(CommerceError::QuantityExceedsLimit(new_quantity, max_quantity));
        }

        match self.lines.iter_mut().find(|l| l.variant_id == variant_id) {
            Some(line) => line.quantity = new_quantity,
            None => self.lines.push(CartLine {
                variant_id,
                product_id,
                quantity: new_quantity,
            }),
        }
        self.updated_at = Utc::now();
        Ok(new_quantity)
    }

    /// Get the line holding a variant.
    pub fn line(&self, variant_id: VariantId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.variant_id == variant_id)
    }

    /// Total item count (sum of quantities).
    pub fn quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub variant_id: VariantId,
    pub product_id: ProductId,
    pub quantity: i64,
}
