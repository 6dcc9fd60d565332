/// Pomodoro timer endpoints
///
/// Timers hold configuration and the current phase; clients run the countdown
/// and call `advance` when a phase ends.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use coursedeck_shared::{
    models::pomodoro::{CreatePomodoro, Pomodoro},
    validation::trim_in_place,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

fn default_focus() -> u32 {
    25
}

fn default_short_break() -> u32 {
    5
}

fn default_long_break() -> u32 {
    15
}

fn default_rounds() -> u32 {
    4
}

/// Create timer request; durations default to 25/5/15 minutes and 4 rounds
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePomodoroRequest {
    /// Display label
    #[validate(length(min = 1, max = 100, message = "Label must be 1-100 characters"))]
    pub label: String,

    /// Focus length in minutes
    #[serde(default = "default_focus")]
    #[validate(range(min = 1, max = 120, message = "Focus must be 1-120 minutes"))]
    pub focus_minutes: u32,

    /// Short break length in minutes
    #[serde(default = "default_short_break")]
    #[validate(range(min = 1, max = 60, message = "Short break must be 1-60 minutes"))]
    pub short_break_minutes: u32,

    /// Long break length in minutes
    #[serde(default = "default_long_break")]
    #[validate(range(min = 1, max = 120, message = "Long break must be 1-120 minutes"))]
    pub long_break_minutes: u32,

    /// Focus rounds before a long break
    #[serde(default = "default_rounds")]
    #[validate(range(min = 1, max = 12, message = "Rounds must be 1-12"))]
    pub rounds_before_long_break: u32,
}

impl CreatePomodoroRequest {
    fn trim(&mut self) {
        trim_in_place(&mut self.label);
    }
}

/// Timer with the length of its current phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroResponse {
    /// Timer record
    #[serde(flatten)]
    pub pomodoro: Pomodoro,

    /// Current phase length in minutes
    pub phase_minutes: u32,
}

impl From<Pomodoro> for PomodoroResponse {
    fn from(pomodoro: Pomodoro) -> Self {
        let phase_minutes = pomodoro.phase_minutes();
        Self {
            pomodoro,
            phase_minutes,
        }
    }
}

/// List timers
pub async fn list_pomodoros(State(state): State<AppState>) -> Json<Vec<PomodoroResponse>> {
    let store = state.store.read().await;
    Json(Pomodoro::list(&store).into_iter().map(Into::into).collect())
}

/// Create timer
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
pub async fn create_pomodoro(
    State(state): State<AppState>,
    Json(mut req): Json<CreatePomodoroRequest>,
) -> ApiResult<(StatusCode, Json<PomodoroResponse>)> {
    req.trim();
    req.validate()?;

    let mut store = state.store.write().await;
    let pomodoro = Pomodoro::create(
        &mut store,
        CreatePomodoro {
            label: req.label,
            focus_minutes: req.focus_minutes,
            short_break_minutes: req.short_break_minutes,
            long_break_minutes: req.long_break_minutes,
            rounds_before_long_break: req.rounds_before_long_break,
        },
        Utc::now(),
    );

    tracing::info!(pomodoro_id = pomodoro.id, label = %pomodoro.label, "Pomodoro created");
    Ok((StatusCode::CREATED, Json(pomodoro.into())))
}

/// Get timer
pub async fn get_pomodoro(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<PomodoroResponse>> {
    let store = state.store.read().await;
    Pomodoro::find_by_id(&store, id)
        .map(|p| Json(p.into()))
        .ok_or_else(|| ApiError::NotFound(format!("pomodoro {} not found", id)))
}

/// Advance timer to its next phase
///
/// # Response
///
/// The timer after the transition. Completing the last focus round before a
/// long break moves to `long_break`; finishing that resets the round count.
pub async fn advance_pomodoro(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<PomodoroResponse>> {
    let mut store = state.store.write().await;
    let pomodoro = Pomodoro::advance_by_id(&mut store, id, Utc::now())?;

    tracing::info!(
        pomodoro_id = id,
        phase = pomodoro.phase.as_str(),
        completed_rounds = pomodoro.completed_rounds,
        "Pomodoro advanced"
    );
    Ok(Json(pomodoro.into()))
}

/// Reset timer to the first focus round
pub async fn reset_pomodoro(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<PomodoroResponse>> {
    let mut store = state.store.write().await;
    let pomodoro = Pomodoro::reset_by_id(&mut store, id, Utc::now())?;

    tracing::info!(pomodoro_id = id, "Pomodoro reset");
    Ok(Json(pomodoro.into()))
}

/// Delete timer
pub async fn delete_pomodoro(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let mut store = state.store.write().await;
    Pomodoro::delete(&mut store, id)?;

    tracing::info!(pomodoro_id = id, "Pomodoro deleted");
    Ok(StatusCode::NO_CONTENT)
}
