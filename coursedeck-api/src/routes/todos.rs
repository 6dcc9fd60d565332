/// Todo board endpoints
///
/// Tasks live in three lanes. The JSON vocabulary for a task's status is
/// `todo|progress|completed`; board-level payloads (`/board`, `/drop`) use the
/// lane names `todo|doing|done`. Responses carry both.
///
/// # Endpoints
///
/// - `GET /v1/todos?status=` - List tasks
/// - `POST /v1/todos` - Create task
/// - `GET /v1/todos/board` - Tasks grouped by lane
/// - `POST /v1/todos/drop` - Drag-and-drop relocation
/// - `PUT /v1/todos/:id` - Edit text and/or status
/// - `DELETE /v1/todos/:id` - Delete task
/// - `POST /v1/todos/:id/forward` - Move one lane forward
/// - `POST /v1/todos/:id/backward` - Move one lane backward

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use coursedeck_shared::{
    models::task::{BoardOutcome, Lane, LanePosition, Task},
    validation::{trim_in_place, TODO_STATUS_PATTERN},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Create task request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTodoRequest {
    /// Task text
    #[validate(length(min = 1, max = 500, message = "Text must be 1-500 characters"))]
    pub text: String,

    /// Initial status (default `todo`)
    #[validate(regex(
        path = *TODO_STATUS_PATTERN,
        message = "Status must be one of todo, progress, completed"
    ))]
    pub status: Option<String>,
}

impl CreateTodoRequest {
    fn trim(&mut self) {
        trim_in_place(&mut self.text);
    }
}

/// Update task request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTodoRequest {
    /// New text
    #[validate(length(min = 1, max = 500, message = "Text must be 1-500 characters"))]
    pub text: Option<String>,

    /// New status
    #[validate(regex(
        path = *TODO_STATUS_PATTERN,
        message = "Status must be one of todo, progress, completed"
    ))]
    pub status: Option<String>,
}

impl UpdateTodoRequest {
    fn trim(&mut self) {
        if let Some(text) = &mut self.text {
            trim_in_place(text);
        }
    }
}

/// Drag-and-drop request
///
/// `destination` is absent when the card was released outside any lane.
#[derive(Debug, Clone, Deserialize)]
pub struct DropRequest {
    /// Where the drag started
    pub source: LanePosition,

    /// Where the card was released
    pub destination: Option<LanePosition>,
}

/// Task list query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoQuery {
    /// Only tasks with this status
    pub status: Option<String>,
}

/// Task as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoResponse {
    /// Task ID
    pub id: i64,

    /// Task text
    pub text: String,

    /// Status (`todo|progress|completed`)
    pub status: String,

    /// Lane (`todo|doing|done`)
    pub lane: Lane,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last changed
    pub updated_at: DateTime<Utc>,
}

impl From<Task> for TodoResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            text: task.text,
            status: task.status.wire_status().to_string(),
            lane: task.status,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

/// Board grouped by lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardResponse {
    /// Lane `todo`
    pub todo: Vec<TodoResponse>,

    /// Lane `doing`
    pub doing: Vec<TodoResponse>,

    /// Lane `done`
    pub done: Vec<TodoResponse>,
}

/// Result of a move or drop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveResponse {
    /// Whether the board changed
    pub changed: bool,

    /// The task after the operation; absent for a drop that changed nothing
    pub task: Option<TodoResponse>,
}

fn parse_status(status: &str) -> ApiResult<Lane> {
    Lane::from_wire_status(status).ok_or_else(|| {
        ApiError::invalid_field("status", "Status must be one of todo, progress, completed")
    })
}

fn convert(tasks: Vec<Task>) -> Vec<TodoResponse> {
    tasks.into_iter().map(Into::into).collect()
}

/// List tasks in board order
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Unknown `status` filter
pub async fn list_todos(
    State(state): State<AppState>,
    Query(query): Query<TodoQuery>,
) -> ApiResult<Json<Vec<TodoResponse>>> {
    let lane = query.status.as_deref().map(parse_status).transpose()?;

    let store = state.store.read().await;
    let tasks = store
        .board
        .tasks()
        .iter()
        .filter(|t| lane.map_or(true, |lane| t.status == lane))
        .cloned()
        .collect();
    Ok(Json(convert(tasks)))
}

/// Get the board grouped by lane
pub async fn get_board(State(state): State<AppState>) -> Json<BoardResponse> {
    let store = state.store.read().await;
    let lanes = store.board.lanes();
    Json(BoardResponse {
        todo: convert(lanes.todo),
        doing: convert(lanes.doing),
        done: convert(lanes.done),
    })
}

/// Create task
///
/// # Endpoint
///
/// ```text
/// POST /v1/todos
/// Content-Type: application/json
///
/// {
///   "text": "Finish chapter 3",
///   "status": "progress"
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Blank text or unknown status
pub async fn create_todo(
    State(state): State<AppState>,
    Json(mut req): Json<CreateTodoRequest>,
) -> ApiResult<(StatusCode, Json<TodoResponse>)> {
    req.trim();
    req.validate()?;
    let lane = match req.status.as_deref() {
        Some(status) => parse_status(status)?,
        None => Lane::Todo,
    };

    let mut store = state.store.write().await;
    let task = store.board.add(&req.text, lane, Utc::now())?;

    tracing::info!(task_id = task.id, lane = %task.status, "Task created");
    Ok((StatusCode::CREATED, Json(task.into())))
}

/// Edit task text and/or status
///
/// Values equal to the current ones leave `updated_at` untouched.
///
/// # Errors
///
/// - `404 Not Found`: Unknown task
/// - `422 Unprocessable Entity`: Blank text or unknown status
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(mut req): Json<UpdateTodoRequest>,
) -> ApiResult<Json<TodoResponse>> {
    req.trim();
    req.validate()?;
    let lane = req.status.as_deref().map(parse_status).transpose()?;

    let mut store = state.store.write().await;
    let outcome = store
        .board
        .update(id, req.text.as_deref(), lane, Utc::now())?;

    if outcome.is_changed() {
        tracing::info!(task_id = id, "Task updated");
    } else {
        tracing::debug!(task_id = id, "Task update changed nothing");
    }

    store
        .board
        .get(id)
        .cloned()
        .map(|t| Json(t.into()))
        .ok_or_else(|| ApiError::NotFound(format!("Task {} not found", id)))
}

/// Delete task
///
/// # Errors
///
/// - `404 Not Found`: Unknown task; the board is unchanged
pub async fn delete_todo(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    let mut store = state.store.write().await;
    match store.board.delete(id) {
        Ok(_) => {
            tracing::info!(task_id = id, "Task deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => {
            tracing::warn!(task_id = id, "Delete of unknown task");
            Err(e.into())
        }
    }
}

/// Move task one lane forward (`todo` -> `doing` -> `done`)
///
/// A task already in `done` is returned with `changed: false`.
pub async fn move_forward(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MoveResponse>> {
    let mut store = state.store.write().await;
    let outcome = store.board.move_forward(id, Utc::now())?;
    let response = step_response(outcome, store.board.get(id).cloned());

    tracing::info!(task_id = id, changed = response.changed, "Task moved forward");
    Ok(Json(response))
}

/// Move task one lane backward (`done` -> `doing` -> `todo`)
///
/// A task already in `todo` is returned with `changed: false`.
pub async fn move_backward(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MoveResponse>> {
    let mut store = state.store.write().await;
    let outcome = store.board.move_backward(id, Utc::now())?;
    let response = step_response(outcome, store.board.get(id).cloned());

    tracing::info!(task_id = id, changed = response.changed, "Task moved backward");
    Ok(Json(response))
}

fn step_response(outcome: BoardOutcome, current: Option<Task>) -> MoveResponse {
    MoveResponse {
        changed: outcome.is_changed(),
        task: current.map(Into::into),
    }
}

/// Drag-and-drop relocation
///
/// # Endpoint
///
/// ```text
/// POST /v1/todos/drop
/// Content-Type: application/json
///
/// {
///   "source": { "lane": "todo", "index": 0 },
///   "destination": { "lane": "done", "index": 2 }
/// }
/// ```
///
/// Only lane membership changes. A drop outside the board or onto the
/// starting slot returns `changed: false`.
///
/// # Errors
///
/// - `404 Not Found`: No task at the source slot
pub async fn drop_todo(
    State(state): State<AppState>,
    Json(req): Json<DropRequest>,
) -> ApiResult<Json<MoveResponse>> {
    let mut store = state.store.write().await;
    let outcome = store
        .board
        .relocate(req.source, req.destination, Utc::now())?;

    let response = match outcome {
        BoardOutcome::Moved(task) => {
            tracing::info!(task_id = task.id, lane = %task.status, "Task dropped");
            MoveResponse {
                changed: true,
                task: Some(task.into()),
            }
        }
        _ => {
            tracing::debug!(source = ?req.source, "Drop changed nothing");
            MoveResponse {
                changed: false,
                task: None,
            }
        }
    };
    Ok(Json(response))
}
