//! Shared application state.

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use crate::cart_store::CartStore;
use crate::config::Settings;
use crate::error::StorefrontResult;
use crate::repository::CatalogRepository;
use crate::templates::Templates;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogRepository>,
    pub carts: Arc<dyn CartStore>,
    pub templates: Arc<Templates>,
    pub settings: Arc<Settings>,
    cookie_key: Key,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        carts: Arc<dyn CartStore>,
        settings: Settings,
        cookie_key: Key,
    ) -> StorefrontResult<Self> {
        Ok(Self {
            catalog,
            carts,
            templates: Arc::new(Templates::new()?),
            settings: Arc::new(settings),
            cookie_key,
        })
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
