//! Catalog data access.

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use turbo_commerce::catalog::{Category, CategoryPath, CategoryTree, Product, ProductAttribute};
use turbo_commerce::pricing::Sale;
use turbo_commerce::{CategoryId, ProductId};

use crate::error::StorefrontResult;

/// Read access to the product catalog.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Look up a product regardless of visibility.
    async fn product(&self, id: ProductId) -> StorefrontResult<Option<Product>>;

    /// Products assigned directly to a category.
    async fn products_in_category(&self, id: CategoryId) -> StorefrontResult<Vec<Product>>;

    /// A category with its ancestors.
    async fn category_path(&self, id: CategoryId) -> StorefrontResult<Option<CategoryPath>>;

    /// All attributes, in display order.
    async fn attributes(&self) -> StorefrontResult<Vec<ProductAttribute>>;

    /// All configured sales, active or not.
    async fn sales(&self) -> StorefrontResult<Vec<Sale>>;
}

/// Seed data for the in-memory catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub attributes: Vec<ProductAttribute>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub sales: Vec<Sale>,
}

impl Fixtures {
    /// Load fixtures from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixtures: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse fixtures: {}", path.display()))
    }
}

/// Catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
    categories: CategoryTree,
    attributes: Vec<ProductAttribute>,
    sales: Vec<Sale>,
}

impl InMemoryCatalog {
    pub fn new(fixtures: Fixtures) -> Self {
        Self {
            products: fixtures.products,
            categories: CategoryTree::new(fixtures.categories),
            attributes: fixtures.attributes,
            sales: fixtures.sales,
        }
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn product(&self, id: ProductId) -> StorefrontResult<Option<Product>> {
        debug!(product_id = %id, "loading product");
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }

    async fn products_in_category(&self, id: CategoryId) -> StorefrontResult<Vec<Product>> {
        let products: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.belongs_to(id))
            .cloned()
            .collect();
        debug!(category_id = %id, count = products.len(), "loaded category products");
        Ok(products)
    }

    async fn category_path(&self, id: CategoryId) -> StorefrontResult<Option<CategoryPath>> {
        debug!(category_id = %id, "loading category");
        Ok(self.categories.path(id))
    }

    async fn attributes(&self) -> StorefrontResult<Vec<ProductAttribute>> {
        Ok(self.attributes.clone())
    }

    async fn sales(&self) -> StorefrontResult<Vec<Sale>> {
        Ok(self.sales.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turbo_commerce::{Currency, Money};

    fn catalog() -> InMemoryCatalog {
        let shoes = Category::new_root(CategoryId::new(1), "Shoes", "shoes");
        let boots = Category::new_child(CategoryId::new(2), &shoes, "Boots", "boots");
        let mut hiker = Product::new(ProductId::new(7), "Hiker", Money::new(9900, Currency::USD));
        hiker.add_category(CategoryId::new(2));

        InMemoryCatalog::new(Fixtures {
            categories: vec![shoes, boots],
            products: vec![hiker],
            ..Fixtures::default()
        })
    }

    #[tokio::test]
    async fn test_product_lookup() {
        let catalog = catalog();
        assert!(catalog.product(ProductId::new(7)).await.unwrap().is_some());
        assert!(catalog.product(ProductId::new(8)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_category_products_are_direct_members() {
        let catalog = catalog();
        assert_eq!(catalog.products_in_category(CategoryId::new(2)).await.unwrap().len(), 1);
        assert!(catalog.products_in_category(CategoryId::new(1)).await.unwrap().is_empty());

        let path = catalog.category_path(CategoryId::new(2)).await.unwrap().unwrap();
        assert_eq!(path.full_path(), "shoes/boots");
    }

    #[test]
    fn test_fixtures_parse() {
        let fixtures: Fixtures = serde_json::from_str(
            r#"{
                "categories": [{"id": 1, "name": "Shoes", "slug": "shoes"}],
                "products": [{
                    "id": 3,
                    "name": "Runner",
                    "price": {"amount_cents": 4500, "currency": "USD"},
                    "category_ids": [1]
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(fixtures.products[0].price.amount_cents, 4500);
        assert!(fixtures.sales.is_empty());
    }
}
