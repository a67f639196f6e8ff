//! Category model and category references
//!
//! Transactions and budget allocations point at categories. On the wire the
//! pointer is either a nested `{ id, name }` object or a bare id, so the
//! canonical reference keeps the name optional.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// Label used for transactions without a category
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// A transaction category (e.g. "Groceries", "Salary")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name
    pub name: String,

    /// Whether this category classifies income rather than spending
    #[serde(default)]
    pub is_income: bool,
}

impl Category {
    /// Create a new expense category
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_income: false,
        }
    }

    /// Create a new income category
    pub fn income(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_income: true,
        }
    }

    /// Find a category by ID in a slice.
    pub fn find_by_id(categories: &[Category], id: CategoryId) -> Option<&Category> {
        categories.iter().find(|c| c.id == id)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A reference to a category, with the name when the source supplied it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: CategoryId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CategoryRef {
    /// A reference known only by id
    pub fn by_id(id: CategoryId) -> Self {
        Self { id, name: None }
    }

    /// A reference with a display name
    pub fn named(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
        }
    }

    /// The grouping label: the name if known, else one derived from the id
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => format!("Category {}", self.id.get()),
        }
    }
}

/// Grouping label for an optional category reference
pub fn category_label(category: Option<&CategoryRef>) -> String {
    category
        .map(CategoryRef::label)
        .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        let named = CategoryRef::named(CategoryId::new(3), "Groceries");
        assert_eq!(named.label(), "Groceries");

        let bare = CategoryRef::by_id(CategoryId::new(3));
        assert_eq!(bare.label(), "Category 3");

        let blank = CategoryRef::named(CategoryId::new(4), "  ");
        assert_eq!(blank.label(), "Category 4");

        assert_eq!(category_label(None), "Uncategorized");
        assert_eq!(category_label(Some(&named)), "Groceries");
    }

    #[test]
    fn test_find() {
        let categories = vec![
            Category::new(CategoryId::new(1), "Groceries"),
            Category::income(CategoryId::new(2), "Salary"),
        ];

        assert!(Category::find_by_id(&categories, CategoryId::new(2))
            .unwrap()
            .is_income);
        assert!(Category::find_by_id(&categories, CategoryId::new(9)).is_none());
    }
}
