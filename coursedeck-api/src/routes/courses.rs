/// Course catalogue endpoints
///
/// # Endpoints
///
/// - `GET /v1/courses?category=&level=` - List courses
/// - `POST /v1/courses` - Create course
/// - `GET /v1/courses/:id` - Get course
/// - `PUT /v1/courses/:id` - Partially update course
/// - `DELETE /v1/courses/:id` - Delete course
/// - `POST /v1/courses/:id/ratings` - Rate course

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
    models::course::{Course, CourseFilter, CreateCourse, Level, UpdateCourse},
    validation::{trim_in_place, validate_tags, LEVEL_PATTERN},
};
use serde::{Deserialize, Deserializer};
use validator::Validate;

/// Create course request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCourseRequest {
    /// Course title
    #[validate(length(min = 3, max = 100, message = "Name must be 3-100 characters"))]
    pub name: String,

    /// Long description
    #[validate(length(min = 10, max = 2000, message = "Description must be 10-2000 characters"))]
    pub description: String,

    /// Category name
    #[validate(length(min = 3, max = 50, message = "Category must be 3-50 characters"))]
    pub category: String,

    /// Skill level
    #[validate(regex(
        path = *LEVEL_PATTERN,
        message = "Level must be one of beginner, intermediate, advanced"
    ))]
    pub level: String,

    /// List price
    #[validate(range(min = 0.0, max = 100000.0, message = "Price must be between 0 and 100000"))]
    pub price: f64,

    /// Discount percentage
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0, message = "Discount must be between 0 and 100"))]
    pub discount: f64,

    /// Cover image URL
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,

    /// Tag names
    #[serde(default)]
    #[validate(custom(function = "validate_tags"))]
    pub tags: Vec<String>,
}

impl CreateCourseRequest {
    fn trim(&mut self) {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.description);
        trim_in_place(&mut self.category);
    }
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field (`None`)
fn explicit_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Update course request; omitted fields are left unchanged
///
/// `image_url: null` removes the cover image.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCourseRequest {
    /// Course title
    #[validate(length(min = 3, max = 100, message = "Name must be 3-100 characters"))]
    pub name: Option<String>,

    /// Long description
    #[validate(length(min = 10, max = 2000, message = "Description must be 10-2000 characters"))]
    pub description: Option<String>,

    /// Category name
    #[validate(length(min = 3, max = 50, message = "Category must be 3-50 characters"))]
    pub category: Option<String>,

    /// Skill level
    #[validate(regex(
        path = *LEVEL_PATTERN,
        message = "Level must be one of beginner, intermediate, advanced"
    ))]
    pub level: Option<String>,

    /// List price
    #[validate(range(min = 0.0, max = 100000.0, message = "Price must be between 0 and 100000"))]
    pub price: Option<f64>,

    /// Discount percentage
    #[validate(range(min = 0.0, max = 100.0, message = "Discount must be between 0 and 100"))]
    pub discount: Option<f64>,

    /// Cover image URL; `Some(None)` clears it
    #[serde(default, deserialize_with = "explicit_null")]
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<Option<String>>,

    /// Replacement tag list
    #[validate(custom(function = "validate_tags"))]
    pub tags: Option<Vec<String>>,
}

impl UpdateCourseRequest {
    fn trim(&mut self) {
        for field in [&mut self.name, &mut self.description, &mut self.category]
            .into_iter()
            .flatten()
        {
            trim_in_place(field);
        }
    }
}

/// Course list query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseQuery {
    /// Category name (case-insensitive)
    pub category: Option<String>,

    /// Skill level
    pub level: Option<String>,
}

/// Rate course request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RateCourseRequest {
    /// Rating from 1 to 5
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: u8,
}

/// Parses a level that already matched [`LEVEL_PATTERN`]
fn parse_level(level: &str) -> ApiResult<Level> {
    level
        .parse::<Level>()
        .map_err(|e| ApiError::invalid_field("level", e.to_string()))
}

/// List courses
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Unknown `level` filter
pub async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<CourseQuery>,
) -> ApiResult<Json<Vec<Course>>> {
    let filter = CourseFilter {
        category: query.category,
        level: query.level.as_deref().map(parse_level).transpose()?,
    };

    let store = state.store.read().await;
    Ok(Json(Course::list(&store, &filter)))
}

/// Create course
///
/// # Endpoint
///
/// ```text
/// POST /v1/courses
/// Content-Type: application/json
///
/// {
///   "name": "Rust Fundamentals",
///   "description": "Ownership, borrowing and traits.",
///   "category": "Programming",
///   "level": "beginner",
///   "price": 49.0,
///   "discount": 10,
///   "tags": ["rust"]
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
pub async fn create_course(
    State(state): State<AppState>,
    Json(mut req): Json<CreateCourseRequest>,
) -> ApiResult<(StatusCode, Json<Course>)> {
    req.trim();
    req.validate()?;
    let level = parse_level(&req.level)?;

    let mut store = state.store.write().await;
    let course = Course::create(
        &mut store,
        CreateCourse {
            name: req.name,
            description: req.description,
            category: req.category,
            level,
            price: req.price,
            discount: req.discount,
            image_url: req.image_url,
            tags: req.tags,
        },
        Utc::now(),
    );

    tracing::info!(course_id = course.id, name = %course.name, "Course created");
    Ok((StatusCode::CREATED, Json(course)))
}

/// Get course by ID
///
/// # Errors
///
/// - `404 Not Found`: Unknown course
pub async fn get_course(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Course>> {
    let store = state.store.read().await;
    Course::find_by_id(&store, id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("course {} not found", id)))
}

/// Update course
///
/// # Errors
///
/// - `404 Not Found`: Unknown course
/// - `422 Unprocessable Entity`: Validation failed
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(mut req): Json<UpdateCourseRequest>,
) -> ApiResult<Json<Course>> {
    req.trim();
    req.validate()?;
    let level = req.level.as_deref().map(parse_level).transpose()?;

    let mut store = state.store.write().await;
    let course = Course::update(
        &mut store,
        id,
        UpdateCourse {
            name: req.name,
            description: req.description,
            category: req.category,
            level,
            price: req.price,
            discount: req.discount,
            image_url: req.image_url,
            tags: req.tags,
        },
        Utc::now(),
    )?;

    tracing::info!(course_id = id, "Course updated");
    Ok(Json(course))
}

/// Delete course
///
/// # Errors
///
/// - `404 Not Found`: Unknown course
pub async fn delete_course(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    let mut store = state.store.write().await;
    Course::delete(&mut store, id)?;

    tracing::info!(course_id = id, "Course deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Rate course
///
/// # Errors
///
/// - `404 Not Found`: Unknown course
/// - `422 Unprocessable Entity`: Rating outside 1-5
pub async fn rate_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<RateCourseRequest>,
) -> ApiResult<Json<Course>> {
    req.validate()?;

    let mut store = state.store.write().await;
    let course = Course::rate(&mut store, id, req.rating, Utc::now())?;

    tracing::info!(course_id = id, rating = req.rating, average = course.average_rating, "Course rated");
    Ok(Json(course))
}
