//! # CourseDeck Shared Library
//!
//! Domain types and business rules shared by the CourseDeck API server.
//!
//! ## Module Organization
//!
//! - `models`: Catalogue records, the todo board, flashcards, pomodoro timers
//!   and the recommendation contract
//! - `store`: In-memory collections that hold every record for the process
//! - `validation`: Shared validation patterns used by request DTOs
//! - `error`: Store error type

pub mod error;
pub mod models;
pub mod store;
pub mod validation;

/// Current version of the CourseDeck shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
