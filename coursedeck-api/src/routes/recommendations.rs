/// Course recommendation endpoint

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use coursedeck_shared::models::{
    course::{Course, CourseFilter},
    recommendation::{RecommendationRequest, RecommendationResult},
};
use validator::Validate;

/// Recommend courses
///
/// # Endpoint
///
/// ```text
/// POST /v1/recommendations
/// Content-Type: application/json
///
/// {
///   "user_id": 42,
///   "preferred_category": "Programming",
///   "skill_level": "beginner",
///   "top_n": 5,
///   "is_registered": false
/// }
/// ```
///
/// # Response
///
/// At most `top_n` courses matching the category and level. An empty list is
/// a valid answer.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
pub async fn recommend(
    State(state): State<AppState>,
    Json(req): Json<RecommendationRequest>,
) -> ApiResult<Json<Vec<RecommendationResult>>> {
    req.validate()?;

    let courses = {
        let store = state.store.read().await;
        Course::list(&store, &CourseFilter::default())
    };
    let results = state.recommender.recommend(&req, &courses);

    tracing::info!(
        user_id = req.user_id,
        category = %req.preferred_category,
        level = %req.skill_level,
        returned = results.len(),
        "Recommendations served"
    );
    Ok(Json(results))
}
