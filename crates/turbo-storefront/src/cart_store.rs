//! Cart persistence.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};
use turbo_commerce::cart::Cart;
use turbo_commerce::catalog::Viewer;
use turbo_commerce::{CartToken, UserId};

use crate::error::StorefrontResult;

/// Storage for shopping carts.
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn find_by_token(&self, token: CartToken) -> StorefrontResult<Option<Cart>>;

    async fn find_for_user(&self, user_id: UserId) -> StorefrontResult<Option<Cart>>;

    /// Insert or replace a cart.
    ///
    /// The whole cart is overwritten: when two requests load the same cart
    /// and save their own changes, the last save wins and the other change
    /// is lost.
    async fn save(&self, cart: &Cart) -> StorefrontResult<()>;
}

/// Find the viewer's cart, creating and storing a new one when none exists.
///
/// Authenticated viewers are matched by user; anonymous viewers by the
/// token from their cart cookie.
pub async fn get_or_create_cart(
    store: &dyn CartStore,
    viewer: &Viewer,
    token: Option<CartToken>,
) -> StorefrontResult<Cart> {
    let existing = match (viewer.user_id(), token) {
        (Some(user_id), _) => store.find_for_user(user_id).await?,
        (None, Some(token)) => store.find_by_token(token).await?,
        (None, None) => None,
    };
    if let Some(cart) = existing {
        return Ok(cart);
    }

    let cart = match viewer.user_id() {
        Some(user_id) => Cart::for_user(user_id),
        None => Cart::new(),
    };
    store.save(&cart).await?;
    info!(cart = %cart.token, user_id = ?cart.user_id, "created cart");
    Ok(cart)
}

/// Carts held in memory.
#[derive(Debug, Default)]
pub struct InMemoryCartStore {
    carts: RwLock<HashMap<CartToken, Cart>>,
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn cart_count(&self) -> usize {
        self.carts.read().await.len()
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn find_by_token(&self, token: CartToken) -> StorefrontResult<Option<Cart>> {
        let cart = self
            .carts
            .read()
            .await
            .get(&token)
            .filter(|cart| cart.user_id.is_none())
            .cloned();
        debug!(cart = %token, found = cart.is_some(), "cart lookup by token");
        Ok(cart)
    }

    async fn find_for_user(&self, user_id: UserId) -> StorefrontResult<Option<Cart>> {
        let carts = self.carts.read().await;
        let cart = carts
            .values()
            .filter(|cart| cart.user_id == Some(user_id))
            .max_by_key(|cart| cart.updated_at)
            .cloned();
        debug!(user_id = %user_id, found = cart.is_some(), "cart lookup by user");
        Ok(cart)
    }

    async fn save(&self, cart: &Cart) -> StorefrontResult<()> {
        self.carts.write().await.insert(cart.token, cart.clone());
        Ok(())
    }
}
