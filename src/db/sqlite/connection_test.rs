//! Tests for SQLite database connection and schema setup.

use chrono::NaiveDate;

use crate::db::{
    Database, NewToDo, NewWorkout, SqliteDatabase, ToDoRepository, WorkoutRepository,
};

#[tokio::test(flavor = "multi_thread")]
async fn migrate_creates_all_tables() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");

    db.migrate().await.expect("Migration should succeed");

    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )
    .fetch_all(db.pool())
    .await
    .expect("Query should succeed");

    assert_eq!(tables, vec!["todo".to_string(), "workout".to_string()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn migrate_is_idempotent() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");

    db.migrate().await.expect("First migration should succeed");

    db.todos()
        .create(&NewToDo {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            task: "Survive a second migrate".to_string(),
        })
        .await
        .expect("Create should succeed");

    db.migrate().await.expect("Second migration should succeed");

    let todos = db.todos().list(None).await.expect("List should succeed");
    assert_eq!(todos.len(), 1, "Re-running the schema must keep existing rows");
}

#[tokio::test(flavor = "multi_thread")]
async fn open_creates_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("fittrack.db");
    assert!(!path.exists());

    let db = SqliteDatabase::open(&path).await.expect("Open should succeed");
    db.migrate().await.expect("Migration should succeed");

    assert!(path.exists(), "Database file should be created on first open");
}

#[tokio::test(flavor = "multi_thread")]
async fn file_database_persists_across_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("fittrack.db");

    let created = {
        let db = SqliteDatabase::open(&path).await.expect("Open should succeed");
        db.migrate().await.expect("Migration should succeed");
        let workout = db
            .workouts()
            .create(&NewWorkout {
                date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                exercise_name: "Deadlift".to_string(),
                sets: 3,
                reps: 5,
                weight: 140.0,
            })
            .await
            .expect("Create should succeed");
        db.close().await;
        workout
    };

    let db = SqliteDatabase::open(&path).await.expect("Reopen should succeed");
    db.migrate().await.expect("Migration should succeed");

    let fetched = db
        .workouts()
        .get(created.id)
        .await
        .expect("Workout should survive reopen");
    assert_eq!(fetched, created);
}

#[tokio::test(flavor = "multi_thread")]
async fn open_fails_for_unwritable_location() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing-subdir").join("fittrack.db");

    let result = SqliteDatabase::open(&path).await;
    assert!(matches!(result, Err(crate::db::DbError::Connection { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn ping_fails_once_pool_is_closed() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");

    db.ping().await.expect("Open database should answer");

    db.close().await;
    assert!(db.ping().await.is_err());
}
