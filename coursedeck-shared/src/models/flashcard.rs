/// Flashcard model and difficulty progression
///
/// Every card carries one of five difficulty states. Answering a card moves
/// it through a fixed table; each move also picks a fixed message for the
/// learner.
///
/// # State Machine
///
/// ```text
/// correct:    new → hard → medium → easy → mastered ⟲
/// incorrect:  new → hard ⟲,  medium → hard,  easy → medium,  mastered → easy
/// ```
///
/// # Example
///
/// ```
/// use coursedeck_shared::models::flashcard::{next_state, Difficulty};
///
/// let transition = next_state(Difficulty::Easy, true);
/// assert_eq!(transition.difficulty, Difficulty::Mastered);
/// assert_eq!(transition.message, "Perfect! Card Mastered!");
/// ```

use crate::{error::StoreError, store::Store};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Flashcard difficulty state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Never reviewed
    New,

    /// Frequently missed
    Hard,

    /// Partially learned
    Medium,

    /// Usually answered correctly
    Easy,

    /// Fully learned
    Mastered,
}

impl Difficulty {
    /// All states, from least to most learned
    pub const ALL: [Difficulty; 5] = [
        Difficulty::New,
        Difficulty::Hard,
        Difficulty::Medium,
        Difficulty::Easy,
        Difficulty::Mastered,
    ];

    /// State name as stored and serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::New => "new",
            Difficulty::Hard => "hard",
            Difficulty::Medium => "medium",
            Difficulty::Easy => "easy",
            Difficulty::Mastered => "mastered",
        }
    }
}

/// Result of answering a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    /// Difficulty after the answer
    pub difficulty: Difficulty,

    /// Message shown to the learner
    pub message: &'static str,
}

/// Computes the next difficulty and message for an answer
///
/// Total over all five states; `mastered` is fixed under a correct answer and
/// `hard` is fixed under an incorrect one.
pub fn next_state(current: Difficulty, correct: bool) -> Transition {
    use Difficulty::*;

    let (difficulty, message) = match (correct, current) {
        (true, New) => (Hard, "Good start! Card moved to Hard."),
        (true, Hard) => (Medium, "Nice work! Card moved to Medium."),
        (true, Medium) => (Easy, "Great job! Card moved to Easy."),
        (true, Easy) => (Mastered, "Perfect! Card Mastered!"),
        (true, Mastered) => (Mastered, "Still mastered. Keep it up!"),
        (false, New) => (Hard, "Keep practicing! Card moved to Hard."),
        (false, Hard) => (Hard, "Don't give up! Card stays Hard."),
        (false, Medium) => (Hard, "Oops! Card moved back to Hard."),
        (false, Easy) => (Medium, "Almost! Card moved back to Medium."),
        (false, Mastered) => (Easy, "Slipped a little! Card moved back to Easy."),
    };

    Transition {
        difficulty,
        message,
    }
}

/// Flashcard record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    /// Unique card ID
    pub id: i64,

    /// Prompt side
    pub front: String,

    /// Answer side
    pub back: String,

    /// Current difficulty
    pub difficulty: Difficulty,

    /// Number of correct answers
    pub correct_count: u32,

    /// Number of incorrect answers
    pub incorrect_count: u32,

    /// Last review time (null if never reviewed)
    pub last_reviewed_at: Option<DateTime<Utc>>,

    /// When the card was created
    pub created_at: DateTime<Utc>,

    /// When the card was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a flashcard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFlashcard {
    /// Prompt side
    pub front: String,

    /// Answer side
    pub back: String,
}

impl Flashcard {
    /// Applies an answer to this card
    pub fn answer(&mut self, correct: bool, now: DateTime<Utc>) -> Transition {
        let transition = next_state(self.difficulty, correct);

        self.difficulty = transition.difficulty;
        if correct {
            self.correct_count += 1;
        } else {
            self.incorrect_count += 1;
        }
        self.last_reviewed_at = Some(now);
        self.updated_at = now;

        transition
    }

    /// Creates a new card in the `new` state
    pub fn create(store: &mut Store, data: CreateFlashcard, now: DateTime<Utc>) -> Self {
        store.flashcards.insert_with(|id| Flashcard {
            id,
            front: data.front.trim().to_string(),
            back: data.back.trim().to_string(),
            difficulty: Difficulty::New,
            correct_count: 0,
            incorrect_count: 0,
            last_reviewed_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Lists cards, optionally restricted to one difficulty
    pub fn list(store: &Store, difficulty: Option<Difficulty>) -> Vec<Self> {
        store
            .flashcards
            .iter()
            .filter(|card| difficulty.map_or(true, |d| card.difficulty == d))
            .cloned()
            .collect()
    }

    /// Finds a card by ID
    pub fn find_by_id(store: &Store, id: i64) -> Option<Self> {
        store.flashcards.get(id).cloned()
    }

    /// Answers a stored card
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no card has this id.
    pub fn review(
        store: &mut Store,
        id: i64,
        correct: bool,
        now: DateTime<Utc>,
    ) -> Result<(Self, Transition), StoreError> {
        let card = store
            .flashcards
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("flashcard", id))?;

        let transition = card.answer(correct, now);
        Ok((card.clone(), transition))
    }

    /// Deletes a card
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no card has this id.
    pub fn delete(store: &mut Store, id: i64) -> Result<Self, StoreError> {
        store
            .flashcards
            .remove(id)
            .ok_or_else(|| StoreError::not_found("flashcard", id))
    }
}
