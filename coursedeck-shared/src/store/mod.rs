/// In-memory storage for CourseDeck records
///
/// Every collection lives in a [`Table`] keyed by a store-assigned integer id.
/// Ids are strictly increasing per table and never reused, even after a
/// delete. The todo board keeps its own ordered list (see
/// [`crate::models::task::TaskBoard`]) because lane order matters there.
///
/// The API server wraps one [`Store`] in a `tokio::sync::RwLock`; nothing in
/// this module is thread-aware.
///
/// # Example
///
/// ```
/// use coursedeck_shared::models::tag::{CreateTag, Tag};
/// use coursedeck_shared::store::Store;
///
/// let mut store = Store::new();
/// let tag = Tag::create(&mut store, CreateTag { name: "rust".to_string() }, chrono::Utc::now()).unwrap();
/// assert_eq!(tag.id, 1);
/// ```

use crate::models::{
    category::Category, course::Course, flashcard::Flashcard, pomodoro::Pomodoro, tag::Tag,
    task::TaskBoard,
};
use std::collections::BTreeMap;

pub mod seed;

/// A keyed collection with monotonically assigned ids
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T: Clone> Table<T> {
    /// Creates an empty table whose first id is 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next id, builds the row from it and stores it
    ///
    /// Returns a copy of the stored row.
    pub fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    /// Looks up a row by id
    pub fn get(&self, id: i64) -> Option<&T> {
        self.rows.get(&id)
    }

    /// Looks up a row by id for mutation
    pub fn get_mut(&mut self, id: i64) -> Option<&mut T> {
        self.rows.get_mut(&id)
    }

    /// Iterates rows in id order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    /// Returns copies of all rows in id order
    pub fn list(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    /// Removes a row, returning it if present
    pub fn remove(&mut self, id: i64) -> Option<T> {
        self.rows.remove(&id)
    }

    /// Number of stored rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// All CourseDeck state held by one process
#[derive(Debug, Clone, Default)]
pub struct Store {
    /// Course catalogue
    pub courses: Table<Course>,

    /// Tags referenced by courses
    pub tags: Table<Tag>,

    /// Course categories
    pub categories: Table<Category>,

    /// Pomodoro timers
    pub pomodoros: Table<Pomodoro>,

    /// Flashcards
    pub flashcards: Table<Flashcard>,

    /// Todo board
    pub board: TaskBoard,
}

impl Store {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        label: &'static str,
    }

    #[test]
    fn test_ids_are_monotonic_and_never_reused() {
        let mut table = Table::new();
        let a = table.insert_with(|id| Row { id, label: "a" });
        let b = table.insert_with(|id| Row { id, label: "b" });
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);

        assert_eq!(table.remove(2), Some(b));
        let c = table.insert_with(|id| Row { id, label: "c" });
        assert_eq!(c.id, 3);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_list_is_in_id_order() {
        let mut table = Table::new();
        for label in ["x", "y", "z"] {
            table.insert_with(|id| Row { id, label });
        }
        let labels: Vec<_> = table.list().into_iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_get_and_remove_missing() {
        let mut table: Table<Row> = Table::new();
        assert!(table.is_empty());
        assert!(table.get(1).is_none());
        assert!(table.get_mut(1).is_none());
        assert!(table.remove(1).is_none());
    }
}
