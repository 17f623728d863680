//! Server-rendered storefront for TurboCommerce.
//!
//! Serves the catalog views on top of `turbo-commerce`:
//!
//! - **Product detail**: `/products/{slug}-{id}/`
//! - **Add to cart**: `/products/{slug}-{id}/add/`
//! - **Category listing**: `/products/category/{path}-{id}/`
//! - **Cart summary**: `/cart/`
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use turbo_storefront::prelude::*;
//!
//! let config = StorefrontConfig::load("storefront.toml")?;
//! let catalog = InMemoryCatalog::new(Fixtures::load("fixtures/catalog.json")?);
//! let state = AppState::new(
//!     Arc::new(catalog),
//!     Arc::new(InMemoryCartStore::new()),
//!     config.settings()?,
//!     config.cookie_key()?,
//! )?;
//! serve(router(state), config.server.address()?).await?;
//! ```

pub mod cart_store;
pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod repository;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;
pub mod templates;
pub mod urls;
pub mod views;

pub use error::{StorefrontError, StorefrontResult};
pub use routes::router;
pub use state::AppState;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart_store::{CartStore, InMemoryCartStore};
    pub use crate::config::{Settings, StorefrontConfig};
    pub use crate::error::{StorefrontError, StorefrontResult};
    pub use crate::repository::{CatalogRepository, Fixtures, InMemoryCatalog};
    pub use crate::routes::router;
    pub use crate::server::serve;
    pub use crate::state::AppState;
    pub use crate::telemetry::init_tracing;
}
