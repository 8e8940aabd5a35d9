//! Integration tests for Workout API endpoints.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::api::{AppState, routes};
use crate::db::{Database, SqliteDatabase};

/// Create a test app with an in-memory database
async fn test_app() -> axum::Router {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create test database");
    db.migrate().await.expect("Failed to run migrations");
    routes::create_router(AppState::new(db))
}

/// Helper to parse JSON response body
async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn squat() -> Value {
    json!({
        "date": "2024-01-15",
        "exercise_name": "Squat",
        "sets": 5,
        "reps": 5,
        "weight": 100.0
    })
}

// =============================================================================
// GET /api/workouts
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn list_workouts_empty() {
    let app = test_app().await;

    let response = app.oneshot(get("/api/workouts")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body, json!([]));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_workouts_invalid_date_returns_bad_request() {
    let app = test_app().await;

    let response = app
        .oneshot(get("/api/workouts?date=15-01-2024"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Invalid date format");
}

#[tokio::test(flavor = "multi_thread")]
async fn list_workouts_repeated_date_returns_json_error() {
    let app = test_app().await;

    let response = app
        .oneshot(get("/api/workouts?date=2024-01-15&date=2024-01-16"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test(flavor = "multi_thread")]
async fn storage_failure_returns_opaque_internal_error() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create test database");
    db.migrate().await.expect("Failed to run migrations");
    sqlx::query("DROP TABLE workout")
        .execute(db.pool())
        .await
        .expect("Failed to drop table");
    let app = routes::create_router(AppState::new(db));

    let response = app.oneshot(get("/api/workouts")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body, json!({"error": "Internal server error"}));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_workouts_empty_date_lists_everything() {
    let app = test_app().await;
    app.clone()
        .oneshot(post_json("/api/workouts", squat()))
        .await
        .unwrap();

    let response = app.oneshot(get("/api/workouts?date=")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_workouts_filters_by_date() {
    let app = test_app().await;

    app.clone()
        .oneshot(post_json("/api/workouts", squat()))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_json(
            "/api/workouts",
            json!({
                "date": "2024-01-16",
                "exercise_name": "Pull-up",
                "sets": 3,
                "reps": 8,
                "weight": 0
            }),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(get("/api/workouts?date=2024-01-15"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["exercise_name"], "Squat");
    assert_eq!(items[0]["date"], "2024-01-15");
    assert_eq!(items[0]["sets"], 5);
    assert_eq!(items[0]["reps"], 5);
    assert_eq!(items[0]["weight"], 100.0);
    assert!(items[0]["id"].is_i64());

    let response = app
        .oneshot(get("/api/workouts?date=2025-06-01"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));
}

// =============================================================================
// POST /api/workouts
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn create_workout_returns_created() {
    let app = test_app().await;

    let response = app
        .oneshot(post_json("/api/workouts", squat()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["date"], "2024-01-15");
    assert_eq!(body["exercise_name"], "Squat");
    assert_eq!(body["sets"], 5);
    assert_eq!(body["reps"], 5);
    assert_eq!(body["weight"], 100.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_workout_assigns_distinct_ids() {
    let app = test_app().await;

    let first = json_body(
        app.clone()
            .oneshot(post_json("/api/workouts", squat()))
            .await
            .unwrap(),
    )
    .await;
    let second = json_body(
        app.oneshot(post_json("/api/workouts", squat()))
            .await
            .unwrap(),
    )
    .await;

    assert_ne!(first["id"], second["id"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_workout_non_numeric_sets_persists_nothing() {
    let app = test_app().await;

    let mut payload = squat();
    payload["sets"] = json!("five");

    let response = app
        .clone()
        .oneshot(post_json("/api/workouts", payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].is_string());

    let response = app.oneshot(get("/api/workouts")).await.unwrap();
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_workout_string_weight_is_rejected() {
    let app = test_app().await;

    let mut payload = squat();
    payload["weight"] = json!("100");

    let response = app
        .oneshot(post_json("/api/workouts", payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_workout_missing_field_returns_bad_request() {
    let app = test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/workouts",
            json!({"date": "2024-01-15", "exercise_name": "Squat", "sets": 5}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("reps"));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_workout_invalid_date_returns_bad_request() {
    let app = test_app().await;

    let mut payload = squat();
    payload["date"] = json!("2024-02-31");

    let response = app
        .oneshot(post_json("/api/workouts", payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("Invalid date format"));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_workout_negative_reps_returns_bad_request() {
    let app = test_app().await;

    let mut payload = squat();
    payload["reps"] = json!(-1);

    let response = app
        .oneshot(post_json("/api/workouts", payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "reps must be a positive integer");
}

#[tokio::test(flavor = "multi_thread")]
async fn create_workout_malformed_json_returns_bad_request() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/workouts")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_workout_without_content_type_returns_bad_request() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/workouts")
                .body(Body::from(serde_json::to_vec(&squat()).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// DELETE /api/workouts/{id}
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn delete_workout_removes_it_from_listing() {
    let app = test_app().await;

    let created = json_body(
        app.clone()
            .oneshot(post_json("/api/workouts", squat()))
            .await
            .unwrap(),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(delete(&format!("/api/workouts/{}", id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Deleted successfully");

    let response = app
        .clone()
        .oneshot(get("/api/workouts?date=2024-01-15"))
        .await
        .unwrap();
    assert_eq!(json_body(response).await, json!([]));

    // A second delete is not a silent success
    let response = app
        .oneshot(delete(&format!("/api/workouts/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_workout_unknown_id_returns_not_found() {
    let app = test_app().await;

    let response = app.oneshot(delete("/api/workouts/12345")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Workout 12345 not found");
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_workout_non_integer_id_returns_not_found() {
    let app = test_app().await;

    let response = app.oneshot(delete("/api/workouts/abc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
