/// Category model
///
/// Categories group courses. Names are unique case-insensitively.

use crate::{error::StoreError, store::Store};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique category ID
    pub id: i64,

    /// Category name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// When the category was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategory {
    /// Category name
    pub name: String,

    /// Optional description
    pub description: Option<String>,
}

impl Category {
    /// Creates a category
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] if the name is taken (ignoring case).
    pub fn create(
        store: &mut Store,
        data: CreateCategory,
        now: DateTime<Utc>,
    ) -> Result<Self, StoreError> {
        let name = data.name.trim().to_string();
        if Self::find_by_name(store, &name).is_some() {
            return Err(StoreError::Duplicate {
                kind: "category",
                name,
            });
        }

        let description = data
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(store.categories.insert_with(|id| Category {
            id,
            name,
            description,
            created_at: now,
        }))
    }

    /// Finds a category by name, ignoring case
    pub fn find_by_name(store: &Store, name: &str) -> Option<Self> {
        let name = name.trim();
        store
            .categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Lists all categories, sorted by name ignoring case
    pub fn list(store: &Store) -> Vec<Self> {
        let mut categories = store.categories.list();
        categories.sort_by_key(|c| (c.name.to_lowercase(), c.id));
        categories
    }

    /// Deletes a category
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no category has this id.
    pub fn delete(store: &mut Store, id: i64) -> Result<Self, StoreError> {
        store
            .categories
            .remove(id)
            .ok_or_else(|| StoreError::not_found("category", id))
    }
}
