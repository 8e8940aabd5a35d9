//! SQLite WorkoutRepository implementation.

use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::helpers::{date_filter_clause, map_sqlx_error};
use crate::db::{DbError, DbResult, Id, NewWorkout, Workout, WorkoutRepository};

const COLUMNS: &str = "id, date, exercise_name, sets, reps, weight";

/// SQLx-backed workout repository.
pub struct SqliteWorkoutRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> WorkoutRepository for SqliteWorkoutRepository<'a> {
    async fn create(&self, workout: &NewWorkout) -> DbResult<Workout> {
        workout.validate()?;

        let sql = format!(
            "INSERT INTO workout (date, exercise_name, sets, reps, weight)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {}",
            COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(workout.date)
            .bind(workout.exercise_name.trim())
            .bind(workout.sets)
            .bind(workout.reps)
            .bind(workout.weight)
            .fetch_one(self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row_to_workout(&row)
    }

    async fn get(&self, id: Id) -> DbResult<Workout> {
        let sql = format!("SELECT {} FROM workout WHERE id = ?", COLUMNS);

        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or_else(|| DbError::not_found("Workout", id))?;

        row_to_workout(&row)
    }

    async fn list(&self, date: Option<NaiveDate>) -> DbResult<Vec<Workout>> {
        let sql = format!(
            "SELECT {} FROM workout {} ORDER BY id ASC",
            COLUMNS,
            date_filter_clause(date)
        );

        let mut query = sqlx::query(&sql);
        if let Some(date) = date {
            query = query.bind(date);
        }

        let rows = query.fetch_all(self.pool).await.map_err(map_sqlx_error)?;
        rows.iter().map(row_to_workout).collect()
    }

    async fn delete(&self, id: Id) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM workout WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Workout", id));
        }

        Ok(())
    }
}

fn row_to_workout(row: &SqliteRow) -> DbResult<Workout> {
    Ok(Workout {
        id: row.try_get("id").map_err(map_sqlx_error)?,
        date: row.try_get("date").map_err(map_sqlx_error)?,
        exercise_name: row.try_get("exercise_name").map_err(map_sqlx_error)?,
        sets: row.try_get("sets").map_err(map_sqlx_error)?,
        reps: row.try_get("reps").map_err(map_sqlx_error)?,
        weight: row.try_get("weight").map_err(map_sqlx_error)?,
    })
}
