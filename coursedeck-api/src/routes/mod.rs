/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `courses`: Course catalogue CRUD and ratings
/// - `tags`: Tag management
/// - `categories`: Category management
/// - `pomodoros`: Pomodoro timers
/// - `todos`: Todo board (moves, drag-and-drop)
/// - `flashcards`: Flashcards and reviews
/// - `recommendations`: Course recommendations

pub mod categories;
pub mod courses;
pub mod flashcards;
pub mod health;
pub mod pomodoros;
pub mod recommendations;
pub mod tags;
pub mod todos;
