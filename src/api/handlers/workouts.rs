//! Workout log handlers.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::db::{Database, Id, NewWorkout, Workout, WorkoutRepository, format_date, parse_date};

use super::{
    DateQuery, ErrorResponse, HandlerError, MessageResponse, db_error_response,
    json_rejection_response, not_found_response, query_rejection_response,
};

// =============================================================================
// DTOs
// =============================================================================

/// Workout response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct WorkoutResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "2024-01-15")]
    pub date: String,
    #[schema(example = "Squat")]
    pub exercise_name: String,
    #[schema(example = 5)]
    pub sets: i64,
    #[schema(example = 5)]
    pub reps: i64,
    #[schema(example = 100.0)]
    pub weight: f64,
}

impl From<Workout> for WorkoutResponse {
    fn from(w: Workout) -> Self {
        Self {
            id: w.id,
            date: format_date(w.date),
            exercise_name: w.exercise_name,
            sets: w.sets,
            reps: w.reps,
            weight: w.weight,
        }
    }
}

/// Create workout request DTO
///
/// Numbers must be JSON numbers; strings are not coerced.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateWorkoutRequest {
    #[schema(example = "2024-01-15")]
    pub date: String,
    #[schema(example = "Squat")]
    pub exercise_name: String,
    #[schema(example = 5)]
    pub sets: i64,
    #[schema(example = 5)]
    pub reps: i64,
    /// Kilograms; 0 for bodyweight movements
    #[schema(example = 100.0)]
    pub weight: f64,
}

// =============================================================================
// Handlers
// =============================================================================

/// List workouts
///
/// Returns every workout, or only those logged on `date`
#[utoipa::path(
    get,
    path = "/api/workouts",
    tag = "workouts",
    params(DateQuery),
    responses(
        (status = 200, description = "List of workouts", body = Vec<WorkoutResponse>),
        (status = 400, description = "Invalid date format", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_workouts<D: Database>(
    State(state): State<AppState<D>>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Result<Json<Vec<WorkoutResponse>>, HandlerError> {
    let Query(query) = query.map_err(query_rejection_response)?;
    let date = query.parse()?;

    let workouts = state
        .db()
        .workouts()
        .list(date)
        .await
        .map_err(db_error_response)?;

    Ok(Json(
        workouts.into_iter().map(WorkoutResponse::from).collect(),
    ))
}

/// Log a workout
///
/// Creates a workout and returns it with its assigned id
#[utoipa::path(
    post,
    path = "/api/workouts",
    tag = "workouts",
    request_body = CreateWorkoutRequest,
    responses(
        (status = 201, description = "Workout created", body = WorkoutResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_workout<D: Database>(
    State(state): State<AppState<D>>,
    payload: Result<Json<CreateWorkoutRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<WorkoutResponse>), HandlerError> {
    let Json(req) = payload.map_err(json_rejection_response)?;

    let workout = NewWorkout {
        date: parse_date(&req.date).map_err(db_error_response)?,
        exercise_name: req.exercise_name,
        sets: req.sets,
        reps: req.reps,
        weight: req.weight,
    };

    let created = state
        .db()
        .workouts()
        .create(&workout)
        .await
        .map_err(db_error_response)?;

    Ok((StatusCode::CREATED, Json(WorkoutResponse::from(created))))
}

/// Delete a workout
#[utoipa::path(
    delete,
    path = "/api/workouts/{id}",
    tag = "workouts",
    params(("id" = i64, Path, description = "Workout ID")),
    responses(
        (status = 200, description = "Workout deleted", body = MessageResponse),
        (status = 404, description = "Workout not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_workout<D: Database>(
    State(state): State<AppState<D>>,
    id: Result<Path<Id>, PathRejection>,
) -> Result<Json<MessageResponse>, HandlerError> {
    let Path(id) = id.map_err(|_| not_found_response("Workout"))?;

    state
        .db()
        .workouts()
        .delete(id)
        .await
        .map_err(db_error_response)?;

    Ok(Json(MessageResponse::deleted()))
}
