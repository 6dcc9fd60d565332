/// Tag endpoints
///
/// Tags are also registered implicitly when a course names them.

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use coursedeck_shared::{
    models::tag::{CreateTag, Tag},
    validation::trim_in_place,
};
use serde::Deserialize;
use validator::Validate;

/// Create tag request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTagRequest {
    /// Tag name
    #[validate(length(min = 2, max = 30, message = "Name must be 2-30 characters"))]
    pub name: String,
}

impl CreateTagRequest {
    fn trim(&mut self) {
        trim_in_place(&mut self.name);
    }
}

/// List tags, sorted by name (case-insensitive)
pub async fn list_tags(State(state): State<AppState>) -> Json<Vec<Tag>> {
    let store = state.store.read().await;
    Json(Tag::list(&store))
}

/// Create tag
///
/// # Errors
///
/// - `409 Conflict`: A tag with this name exists
/// - `422 Unprocessable Entity`: Validation failed
pub async fn create_tag(
    State(state): State<AppState>,
    Json(mut req): Json<CreateTagRequest>,
) -> ApiResult<(StatusCode, Json<Tag>)> {
    req.trim();
    req.validate()?;

    let mut store = state.store.write().await;
    let tag = Tag::create(&mut store, CreateTag { name: req.name }, Utc::now())?;

    tracing::info!(tag_id = tag.id, name = %tag.name, "Tag created");
    Ok((StatusCode::CREATED, Json(tag)))
}

/// Delete tag
///
/// Courses keep the name in their own tag list.
pub async fn delete_tag(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    let mut store = state.store.write().await;
    let tag = Tag::delete(&mut store, id)?;

    tracing::info!(tag_id = id, name = %tag.name, "Tag deleted");
    Ok(StatusCode::NO_CONTENT)
}
