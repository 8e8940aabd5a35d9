//! Request handlers and their DTOs.
//!
//! Error mapping shared by all handlers lives here:
//! validation failures are 400, unknown ids are 404, and anything
//! else is an opaque 500 whose cause only goes to the log.

mod system;
mod todos;
mod workouts;

#[cfg(test)]
mod workouts_test;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::db::{DbError, parse_date};

pub use system::*;
pub use todos::*;
pub use workouts::*;

/// Error response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Invalid date format")]
    pub error: String,
}

/// Confirmation returned by delete endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Deleted successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn deleted() -> Self {
        Self {
            message: "Deleted successfully".to_string(),
        }
    }
}

/// Optional `?date=YYYY-MM-DD` filter shared by the list endpoints.
#[derive(Debug, Deserialize, IntoParams)]
pub struct DateQuery {
    /// Only return records on this day
    #[param(example = "2024-01-15")]
    pub date: Option<String>,
}

impl DateQuery {
    /// Parse the filter. An empty value means no filter.
    fn parse(&self) -> Result<Option<NaiveDate>, HandlerError> {
        match self.date.as_deref().filter(|d| !d.is_empty()) {
            Some(date) => parse_date(date)
                .map(Some)
                .map_err(|_| error_response(StatusCode::BAD_REQUEST, "Invalid date format")),
            None => Ok(None),
        }
    }
}

/// Error half of every handler's return type.
pub type HandlerError = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, message: impl Into<String>) -> HandlerError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn db_error_response(e: DbError) -> HandlerError {
    match e {
        DbError::NotFound { entity_type, id } => error_response(
            StatusCode::NOT_FOUND,
            format!("{} {} not found", entity_type, id),
        ),
        DbError::Validation { message } => error_response(StatusCode::BAD_REQUEST, message),
        other => {
            error!(error = %other, "Database operation failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

fn json_rejection_response(rejection: JsonRejection) -> HandlerError {
    error_response(StatusCode::BAD_REQUEST, rejection.body_text())
}

fn query_rejection_response(rejection: QueryRejection) -> HandlerError {
    error_response(StatusCode::BAD_REQUEST, rejection.body_text())
}

fn not_found_response(entity_type: &str) -> HandlerError {
    error_response(
        StatusCode::NOT_FOUND,
        format!("{} not found", entity_type),
    )
}
