//! Shared helper functions for SQLite repositories.

use chrono::NaiveDate;

use crate::db::DbError;

/// Wrap a driver error. Constraint violations that slip past model
/// validation are still client errors.
pub fn map_sqlx_error(e: sqlx::Error) -> DbError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_check_violation() => DbError::Validation {
            message: db_err.message().to_string(),
        },
        _ => DbError::Database {
            message: e.to_string(),
        },
    }
}

/// Build the optional `WHERE date = ?` clause for list queries.
pub fn date_filter_clause(date: Option<NaiveDate>) -> &'static str {
    match date {
        Some(_) => "WHERE date = ?",
        None => "",
    }
}
