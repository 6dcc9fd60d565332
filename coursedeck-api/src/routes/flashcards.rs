/// Flashcard endpoints
///
/// Reviewing a card moves it through `new -> hard -> medium -> easy ->
/// mastered` on correct answers and back down on misses.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use coursedeck_shared::{
    models::flashcard::{CreateFlashcard, Difficulty, Flashcard},
    validation::trim_in_place,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Create card request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFlashcardRequest {
    /// Question side
    #[validate(length(min = 1, max = 500, message = "Front must be 1-500 characters"))]
    pub front: String,

    /// Answer side
    #[validate(length(min = 1, max = 2000, message = "Back must be 1-2000 characters"))]
    pub back: String,
}

impl CreateFlashcardRequest {
    fn trim(&mut self) {
        trim_in_place(&mut self.front);
        trim_in_place(&mut self.back);
    }
}

/// Review request
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRequest {
    /// Whether the card was answered correctly
    pub correct: bool,
}

/// Review result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    /// Card after the review
    pub card: Flashcard,

    /// Difficulty before the review
    pub previous_difficulty: Difficulty,

    /// Difficulty after the review
    pub difficulty: Difficulty,

    /// Feedback for the learner
    pub message: String,
}

/// Card list query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlashcardQuery {
    /// Only cards in this state
    pub difficulty: Option<Difficulty>,
}

/// List cards
pub async fn list_flashcards(
    State(state): State<AppState>,
    Query(query): Query<FlashcardQuery>,
) -> Json<Vec<Flashcard>> {
    let store = state.store.read().await;
    Json(Flashcard::list(&store, query.difficulty))
}

/// Create card
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
pub async fn create_flashcard(
    State(state): State<AppState>,
    Json(mut req): Json<CreateFlashcardRequest>,
) -> ApiResult<(StatusCode, Json<Flashcard>)> {
    req.trim();
    req.validate()?;

    let mut store = state.store.write().await;
    let card = Flashcard::create(
        &mut store,
        CreateFlashcard {
            front: req.front,
            back: req.back,
        },
        Utc::now(),
    );

    tracing::info!(flashcard_id = card.id, "Flashcard created");
    Ok((StatusCode::CREATED, Json(card)))
}

/// Get card
pub async fn get_flashcard(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Flashcard>> {
    let store = state.store.read().await;
    Flashcard::find_by_id(&store, id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("flashcard {} not found", id)))
}

/// Review card
///
/// # Endpoint
///
/// ```text
/// POST /v1/flashcards/:id/review
/// Content-Type: application/json
///
/// { "correct": true }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "card": { "id": 1, "difficulty": "mastered", ... },
///   "previous_difficulty": "easy",
///   "difficulty": "mastered",
///   "message": "Perfect! Card Mastered!"
/// }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: Unknown card
pub async fn review_flashcard(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ReviewRequest>,
) -> ApiResult<Json<ReviewResponse>> {
    let mut store = state.store.write().await;
    let previous_difficulty = Flashcard::find_by_id(&store, id)
        .map(|c| c.difficulty)
        .ok_or_else(|| ApiError::NotFound(format!("flashcard {} not found", id)))?;

    let (card, transition) = Flashcard::review(&mut store, id, req.correct, Utc::now())?;

    tracing::info!(
        flashcard_id = id,
        correct = req.correct,
        from = previous_difficulty.as_str(),
        to = transition.difficulty.as_str(),
        "Flashcard reviewed"
    );

    Ok(Json(ReviewResponse {
        card,
        previous_difficulty,
        difficulty: transition.difficulty,
        message: transition.message.to_string(),
    }))
}

/// Delete card
pub async fn delete_flashcard(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let mut store = state.store.write().await;
    Flashcard::delete(&mut store, id)?;

    tracing::info!(flashcard_id = id, "Flashcard deleted");
    Ok(StatusCode::NO_CONTENT)
}
