/// Domain models for CourseDeck
///
/// Each model owns its record type, its `Create*` input and the operations
/// that read or change it in a [`Store`](crate::store::Store).
///
/// # Models
///
/// - `course`: Course catalogue, pricing and ratings
/// - `tag`: Course tags
/// - `category`: Course categories
/// - `pomodoro`: Pomodoro timers and their phase cycle
/// - `task`: Todo board (lanes, moves, drag-and-drop)
/// - `flashcard`: Flashcards and the difficulty progression
/// - `recommendation`: Recommendation contract and the catalogue ranker
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use coursedeck_shared::models::flashcard::{CreateFlashcard, Flashcard};
/// use coursedeck_shared::store::Store;
///
/// let mut store = Store::new();
/// let card = Flashcard::create(&mut store, CreateFlashcard {
///     front: "Capital of France?".to_string(),
///     back: "Paris".to_string(),
/// }, Utc::now());
///
/// let (_, transition) = Flashcard::review(&mut store, card.id, true, Utc::now()).unwrap();
/// println!("{}", transition.message);
/// ```

pub mod category;
pub mod course;
pub mod flashcard;
pub mod pomodoro;
pub mod recommendation;
pub mod tag;
pub mod task;
