/// Category endpoints

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use coursedeck_shared::{
    models::category::{Category, CreateCategory},
    validation::trim_in_place,
};
use serde::Deserialize;
use validator::Validate;

/// Create category request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    /// Category name
    #[validate(length(min = 3, max = 50, message = "Name must be 3-50 characters"))]
    pub name: String,

    /// Optional description
    #[validate(length(max = 200, message = "Description must be at most 200 characters"))]
    pub description: Option<String>,
}

impl CreateCategoryRequest {
    fn trim(&mut self) {
        trim_in_place(&mut self.name);
        if let Some(description) = &mut self.description {
            trim_in_place(description);
        }
    }
}

/// List categories, sorted by name (case-insensitive)
pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    let store = state.store.read().await;
    Json(Category::list(&store))
}

/// Create category
///
/// # Endpoint
///
/// ```text
/// POST /v1/categories
/// Content-Type: application/json
///
/// {
///   "name": "Programming",
///   "description": "Software development courses"
/// }
/// ```
///
/// # Errors
///
/// - `409 Conflict`: A category with this name exists
/// - `422 Unprocessable Entity`: Validation failed
pub async fn create_category(
    State(state): State<AppState>,
    Json(mut req): Json<CreateCategoryRequest>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    req.trim();
    req.validate()?;

    let mut store = state.store.write().await;
    let category = Category::create(
        &mut store,
        CreateCategory {
            name: req.name,
            description: req.description,
        },
        Utc::now(),
    )?;

    tracing::info!(category_id = category.id, name = %category.name, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// Delete category
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let mut store = state.store.write().await;
    Category::delete(&mut store, id)?;

    tracing::info!(category_id = id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
