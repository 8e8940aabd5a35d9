//! Daily to-do handlers.

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
use crate::db::{Database, Id, NewToDo, ToDo, ToDoRepository, format_date, parse_date};

use super::{
    DateQuery, ErrorResponse, HandlerError, MessageResponse, db_error_response,
    json_rejection_response, not_found_response, query_rejection_response,
};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct ToDoResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "2024-01-15")]
    pub date: String,
    #[schema(example = "Buy milk")]
    pub task: String,
    #[schema(example = false)]
    pub completed: bool,
}

impl From<ToDo> for ToDoResponse {
    fn from(t: ToDo) -> Self {
        Self {
            id: t.id,
            date: format_date(t.date),
            task: t.task,
            completed: t.completed,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateToDoRequest {
    #[schema(example = "2024-01-15")]
    pub date: String,
    #[schema(example = "Buy milk")]
    pub task: String,
}

/// Update to-do request DTO
///
/// Only `completed` can change. A body without it leaves the to-do as is.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateToDoRequest {
    #[schema(example = true)]
    pub completed: Option<bool>,
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/todos",
    tag = "todos",
    params(DateQuery),
    responses(
        (status = 200, description = "List of to-dos", body = Vec<ToDoResponse>),
        (status = 400, description = "Invalid date format", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_todos<D: Database>(
    State(state): State<AppState<D>>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Result<Json<Vec<ToDoResponse>>, HandlerError> {
    let Query(query) = query.map_err(query_rejection_response)?;
    let date = query.parse()?;

    let todos = state
        .db()
        .todos()
        .list(date)
        .await
        .map_err(db_error_response)?;

    Ok(Json(todos.into_iter().map(ToDoResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/todos",
    tag = "todos",
    request_body = CreateToDoRequest,
    responses(
        (status = 201, description = "To-do created", body = ToDoResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_todo<D: Database>(
    State(state): State<AppState<D>>,
    payload: Result<Json<CreateToDoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ToDoResponse>), HandlerError> {
    let Json(req) = payload.map_err(json_rejection_response)?;

    let todo = NewToDo {
        date: parse_date(&req.date).map_err(db_error_response)?,
        task: req.task,
    };

    let created = state
        .db()
        .todos()
        .create(&todo)
        .await
        .map_err(db_error_response)?;

    Ok((StatusCode::CREATED, Json(ToDoResponse::from(created))))
}

/// Mark a to-do done or not done
#[utoipa::path(
    put,
    path = "/api/todos/{id}",
    tag = "todos",
    params(("id" = i64, Path, description = "To-do ID")),
    request_body = UpdateToDoRequest,
    responses(
        (status = 200, description = "To-do updated", body = ToDoResponse),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 404, description = "To-do not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_todo<D: Database>(
    State(state): State<AppState<D>>,
    id: Result<Path<Id>, PathRejection>,
    payload: Result<Json<UpdateToDoRequest>, JsonRejection>,
) -> Result<Json<ToDoResponse>, HandlerError> {
    let Path(id) = id.map_err(|_| not_found_response("ToDo"))?;
    let todos = state.db().todos();

    // Unknown ids are 404 even when the body is unusable
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            todos.get(id).await.map_err(db_error_response)?;
            return Err(json_rejection_response(rejection));
        }
    };

    let todo = match req.completed {
        Some(completed) => todos.set_completed(id, completed).await,
        None => todos.get(id).await,
    }
    .map_err(db_error_response)?;

    Ok(Json(ToDoResponse::from(todo)))
}

#[utoipa::path(
    delete,
    path = "/api/todos/{id}",
    tag = "todos",
    params(("id" = i64, Path, description = "To-do ID")),
    responses(
        (status = 200, description = "To-do deleted", body = MessageResponse),
        (status = 404, description = "To-do not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_todo<D: Database>(
    State(state): State<AppState<D>>,
    id: Result<Path<Id>, PathRejection>,
) -> Result<Json<MessageResponse>, HandlerError> {
    let Path(id) = id.map_err(|_| not_found_response("ToDo"))?;

    state
        .db()
        .todos()
        .delete(id)
        .await
        .map_err(db_error_response)?;

    Ok(Json(MessageResponse::deleted()))
}
