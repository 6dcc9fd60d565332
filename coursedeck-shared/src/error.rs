/// Errors raised by store operations
///
/// Board-specific failures live in [`crate::models::task::BoardError`]; this
/// type covers lookups and uniqueness checks on the catalogue collections.

/// Error type for store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No record with this id exists in the collection
    #[error("{kind} {id} not found")]
    NotFound {
        /// Record kind (e.g. "course")
        kind: &'static str,
        /// Requested id
        id: i64,
    },

    /// A record with the same unique name already exists
    #[error("{kind} named '{name}' already exists")]
    Duplicate {
        /// Record kind (e.g. "tag")
        kind: &'static str,
        /// Conflicting name
        name: String,
    },
}

impl StoreError {
    /// Shorthand for a not-found error
    pub fn not_found(kind: &'static str, id: i64) -> Self {
        StoreError::NotFound { kind, id }
    }
}
