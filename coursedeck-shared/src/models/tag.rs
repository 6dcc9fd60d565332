/// Tag model
///
/// Tags label courses. Names are unique case-insensitively; creating a course
/// with unknown tag names registers them here.

use crate::{error::StoreError, store::Store};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tag record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Unique tag ID
    pub id: i64,

    /// Tag name
    pub name: String,

    /// When the tag was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTag {
    /// Tag name
    pub name: String,
}

impl Tag {
    /// Creates a tag
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] if a tag with the same name (ignoring
    /// case) exists.
    pub fn create(store: &mut Store, data: CreateTag, now: DateTime<Utc>) -> Result<Self, StoreError> {
        let name = data.name.trim().to_string();
        if Self::find_by_name(store, &name).is_some() {
            return Err(StoreError::Duplicate { kind: "tag", name });
        }

        Ok(store.tags.insert_with(|id| Tag {
            id,
            name,
            created_at: now,
        }))
    }

    /// Returns the tag with this name, creating it when missing
    pub fn find_or_create(store: &mut Store, name: &str, now: DateTime<Utc>) -> Self {
        if let Some(tag) = Self::find_by_name(store, name) {
            return tag;
        }

        let name = name.trim().to_string();
        store.tags.insert_with(|id| Tag {
            id,
            name,
            created_at: now,
        })
    }

    /// Finds a tag by name, ignoring case and surrounding whitespace
    pub fn find_by_name(store: &Store, name: &str) -> Option<Self> {
        let name = name.trim();
        store
            .tags
            .iter()
            .find(|tag| tag.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Lists all tags, sorted by name ignoring case
    pub fn list(store: &Store) -> Vec<Self> {
        let mut tags = store.tags.list();
        tags.sort_by_key(|t| (t.name.to_lowercase(), t.id));
        tags
    }

    /// Deletes a tag
    ///
    /// Courses keep the tag name in their own tag list.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no tag has this id.
    pub fn delete(store: &mut Store, id: i64) -> Result<Self, StoreError> {
        store
            .tags
            .remove(id)
            .ok_or_else(|| StoreError::not_found("tag", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_rejects_duplicate_names() {
        let mut store = Store::new();
        let now = Utc::now();
        Tag::create(&mut store, CreateTag { name: "Rust".to_string() }, now).unwrap();

        let err = Tag::create(&mut store, CreateTag { name: " rust ".to_string() }, now).unwrap_err();
        assert_eq!(
            err,
            StoreError::Duplicate {
                kind: "tag",
                name: "rust".to_string()
            }
        );
    }

    #[test]
    fn test_find_or_create() {
        let mut store = Store::new();
        let now = Utc::now();
        let first = Tag::find_or_create(&mut store, "web", now);
        let again = Tag::find_or_create(&mut store, "WEB", now);
        assert_eq!(first, again);
        assert_eq!(Tag::list(&store).len(), 1);
    }

    #[test]
    fn test_list_is_sorted_by_name() {
        let mut store = Store::new();
        let now = Utc::now();
        for name in ["web", "Async", "rust"] {
            Tag::create(&mut store, CreateTag { name: name.to_string() }, now).unwrap();
        }

        let names: Vec<String> = Tag::list(&store).into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Async", "rust", "web"]);
    }

    #[test]
    fn test_delete() {
        let mut store = Store::new();
        let tag = Tag::create(&mut store, CreateTag { name: "sql".to_string() }, Utc::now()).unwrap();
        assert_eq!(Tag::delete(&mut store, tag.id).unwrap(), tag);
        assert_eq!(
            Tag::delete(&mut store, tag.id).unwrap_err(),
            StoreError::not_found("tag", tag.id)
        );
    }
}
