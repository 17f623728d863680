//! Handlebars templates embedded in the binary.

use axum::response::Html;
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use crate::error::{StorefrontError, StorefrontResult};

pub const PRODUCT_DETAILS: &str = "product/details";
pub const CATEGORY_INDEX: &str = "category/index";
pub const CART_INDEX: &str = "cart/index";

const TEMPLATES: &[(&str, &str)] = &[
    (PRODUCT_DETAILS, include_str!("../templates/product/details.hbs")),
    (CATEGORY_INDEX, include_str!("../templates/category/index.hbs")),
    (CART_INDEX, include_str!("../templates/cart/index.hbs")),
];

const PARTIALS: &[(&str, &str)] = &[
    ("header", include_str!("../templates/partials/header.hbs")),
    ("footer", include_str!("../templates/partials/footer.hbs")),
];

/// Registry of page templates.
pub struct Templates {
    handlebars: Handlebars<'static>,
}

impl Templates {
    /// Register every embedded template and partial.
    pub fn new() -> StorefrontResult<Self> {
        let mut handlebars = Handlebars::new();

        for (name, source) in PARTIALS {
            handlebars
                .register_partial(name, *source)
                .map_err(|e| StorefrontError::Template(format!("Failed to register partial {name}: {e}")))?;
        }
        for (name, source) in TEMPLATES {
            handlebars
                .register_template_string(name, *source)
                .map_err(|e| StorefrontError::Template(format!("Failed to register {name}: {e}")))?;
        }

        Ok(Self { handlebars })
    }

    /// Render a template with the given context.
    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> StorefrontResult<Html<String>> {
        debug!(template = name, "rendering");
        Ok(Html(self.handlebars.render(name, context)?))
    }
}
