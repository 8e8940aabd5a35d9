//! SQLite ToDoRepository implementation.

use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::helpers::{date_filter_clause, map_sqlx_error};
use crate::db::{DbError, DbResult, Id, NewToDo, ToDo, ToDoRepository};

const COLUMNS: &str = "id, date, task, completed";

/// SQLx-backed to-do repository.
pub struct SqliteToDoRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> ToDoRepository for SqliteToDoRepository<'a> {
    async fn create(&self, todo: &NewToDo) -> DbResult<ToDo> {
        todo.validate()?;

        let sql = format!(
            "INSERT INTO todo (date, task, completed) VALUES (?, ?, 0) RETURNING {}",
            COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(todo.date)
            .bind(todo.task.trim())
            .fetch_one(self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row_to_todo(&row)
    }

    async fn get(&self, id: Id) -> DbResult<ToDo> {
        let sql = format!("SELECT {} FROM todo WHERE id = ?", COLUMNS);

        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or_else(|| DbError::not_found("ToDo", id))?;

        row_to_todo(&row)
    }

    async fn list(&self, date: Option<NaiveDate>) -> DbResult<Vec<ToDo>> {
        let sql = format!(
            "SELECT {} FROM todo {} ORDER BY id ASC",
            COLUMNS,
            date_filter_clause(date)
        );

        let mut query = sqlx::query(&sql);
        if let Some(date) = date {
            query = query.bind(date);
        }

        let rows = query.fetch_all(self.pool).await.map_err(map_sqlx_error)?;
        rows.iter().map(row_to_todo).collect()
    }

    async fn set_completed(&self, id: Id, completed: bool) -> DbResult<ToDo> {
        // Single statement, so the read-back can't observe another writer's change.
        let sql = format!(
            "UPDATE todo SET completed = ? WHERE id = ? RETURNING {}",
            COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(completed)
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or_else(|| DbError::not_found("ToDo", id))?;

        row_to_todo(&row)
    }

    async fn delete(&self, id: Id) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM todo WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("ToDo", id));
        }

        Ok(())
    }
}

fn row_to_todo(row: &SqliteRow) -> DbResult<ToDo> {
    Ok(ToDo {
        id: row.try_get("id").map_err(map_sqlx_error)?,
        date: row.try_get("date").map_err(map_sqlx_error)?,
        task: row.try_get("task").map_err(map_sqlx_error)?,
        completed: row.try_get("completed").map_err(map_sqlx_error)?,
    })
}
