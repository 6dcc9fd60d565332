/// Health check endpoint
///
/// Reports that the server is up along with record counts from the store.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "courses": 5,
///   "tasks": 2,
///   "flashcards": 0
/// }
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Number of courses in the catalogue
    pub courses: usize,

    /// Number of tasks on the todo board
    pub tasks: usize,

    /// Number of flashcards
    pub flashcards: usize,
}

/// Health check handler
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let store = state.store.read().await;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        courses: store.courses.len(),
        tasks: store.board.tasks().len(),
        flashcards: store.flashcards.len(),
    }))
}
