//! Category types for product organization.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ids::CategoryId;

/// A product category in the catalog hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Parent category ID (None for root categories).
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
    /// Category name.
    pub name: String,
    /// URL-friendly slug.
    pub slug: String,
    /// Category description.
    #[serde(default)]
    pub description: String,
}

impl Category {
    /// Create a new root category.
    pub fn new_root(id: CategoryId, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id,
            parent_id: None,
            name: name.into(),
            slug: slug.into(),
            description: String::new(),
        }
    }

    /// Create a new child category.
    pub fn new_child(
        id: CategoryId,
        parent: &Category,
        name: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            parent_id: Some(parent.id),
            ..Self::new_root(id, name, slug)
        }
    }

    /// Check if this is a root category.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A category together with its ancestors, root first.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryPath {
    pub category: Category,
    pub ancestors: Vec<Category>,
}

impl CategoryPath {
    /// Slugs from the root down to this category, joined with `/`.
    ///
    /// This is the canonical path used in listing URLs.
    pub fn full_path(&self) -> String {
        self.ancestors
            .iter()
            .chain(std::iter::once(&self.category))
            .map(|c| c.slug.as_str())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Depth in the hierarchy (0 = root).
    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }
}

/// Flat category index able to resolve ancestor chains.
#[derive(Debug, Clone, Default)]
pub struct CategoryTree {
    by_id: HashMap<CategoryId, Category>,
}

impl CategoryTree {
    pub fn new(categories: impl IntoIterator<Item = Category>) -> Self {
        Self {
            by_id: categories.into_iter().map(|c| (c.id, c)).collect(),
        }
    }

    pub fn insert(&mut self, category: Category) {
        self.by_id.insert(category.id, category);
    }

    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.by_id.get(&id)
    }

    /// Resolve the category and its ancestors.
    ///
    /// Walking stops at a missing parent or when a cycle is detected, so a
    /// damaged hierarchy still yields a usable (shorter) path.
    pub fn path(&self, id: CategoryId) -> Option<CategoryPath> {
        let category = self.by_id.get(&id)?.clone();
        let mut ancestors = Vec::new();
        let mut seen = vec![category.id];
        let mut parent = category.parent_id;

        while let Some(parent_id) = parent {
            if seen.contains(&parent_id) {
                break;
            }
            let Some(parent_category) = self.by_id.get(&parent_id) else {
                break;
            };
            seen.push(parent_id);
            parent = parent_category.parent_id;
            ancestors.push(parent_category.clone());
        }

        ancestors.reverse();
        Some(CategoryPath {
            category,
            ancestors,
        })
    }
}
