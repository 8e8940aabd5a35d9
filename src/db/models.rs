//! Domain models for the tracker database.
//!
//! These models are storage-agnostic and represent the core entities
//! used throughout the application. `New*` types carry the caller-supplied
//! fields of a record that does not have an id yet.

use chrono::NaiveDate;

use super::{DbError, DbResult};

/// Row identifier assigned by storage.
pub type Id = i64;

/// Wire and storage format of calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date string.
pub fn parse_date(value: &str) -> DbResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| DbError::Validation {
        message: format!("Invalid date format: '{}' (expected YYYY-MM-DD)", value),
    })
}

/// Format a date the way it is stored and returned.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

// =============================================================================
// Workout
// =============================================================================

/// One logged exercise set-group.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: Id,
    pub date: NaiveDate,
    pub exercise_name: String,
    pub sets: i64,
    pub reps: i64,
    pub weight: f64,
}

/// Fields of a workout about to be created.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkout {
    pub date: NaiveDate,
    pub exercise_name: String,
    pub sets: i64,
    pub reps: i64,
    pub weight: f64,
}

impl NewWorkout {
    /// Check range constraints. Nothing is persisted unless this passes.
    pub fn validate(&self) -> DbResult<()> {
        require_text("exercise_name", &self.exercise_name)?;
        require_positive("sets", self.sets)?;
        require_positive("reps", self.reps)?;

        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(DbError::Validation {
                message: "weight must be a non-negative number".to_string(),
            });
        }

        Ok(())
    }
}

// =============================================================================
// ToDo
// =============================================================================

/// A task scheduled for a calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToDo {
    pub id: Id,
    pub date: NaiveDate,
    pub task: String,
    pub completed: bool,
}

/// Fields of a to-do about to be created. New to-dos always start incomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewToDo {
    pub date: NaiveDate,
    pub task: String,
}

impl NewToDo {
    pub fn validate(&self) -> DbResult<()> {
        require_text("task", &self.task)
    }
}

// =============================================================================
// Field checks
// =============================================================================

fn require_text(field: &str, value: &str) -> DbResult<()> {
    if value.trim().is_empty() {
        return Err(DbError::Validation {
            message: format!("{} must not be empty", field),
        });
    }
    Ok(())
}

fn require_positive(field: &str, value: i64) -> DbResult<()> {
    if value < 1 {
        return Err(DbError::Validation {
            message: format!("{} must be a positive integer", field),
        });
    }
    Ok(())
}
