//! API route configuration.

use axum::Router;
use axum::routing::{delete, get, post, put};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{
    self, CreateToDoRequest, CreateWorkoutRequest, ErrorResponse, HealthResponse, MessageResponse,
    ToDoResponse, UpdateToDoRequest, WorkoutResponse,
};
use super::state::AppState;
use super::static_assets;
use crate::db::Database;

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "FitTrack API",
        version = "0.1.0",
        description = "Workout log and daily to-do API",
        license(name = "GPL-2.0")
    ),
    paths(
        handlers::health,
        handlers::list_workouts,
        handlers::create_workout,
        handlers::delete_workout,
        handlers::list_todos,
        handlers::create_todo,
        handlers::update_todo,
        handlers::delete_todo,
    ),
    components(
        schemas(
            HealthResponse,
            WorkoutResponse,
            CreateWorkoutRequest,
            ToDoResponse,
            CreateToDoRequest,
            UpdateToDoRequest,
            MessageResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "workouts", description = "Workout log endpoints"),
        (name = "todos", description = "Daily to-do endpoints")
    )
)]
pub struct ApiDoc;

/// Create the application router.
///
/// JSON endpoints live under `/api`, the OpenAPI reference under `/docs`,
/// and everything else falls through to the embedded page.
pub fn create_router<D: Database + 'static>(state: AppState<D>) -> Router {
    let api = ApiDoc::openapi();

    let system_routes = routes!(D => {
        get "/health" => handlers::health,
    });

    let workout_routes = routes!(D => {
        get "/workouts" => handlers::list_workouts,
        post "/workouts" => handlers::create_workout,
        delete "/workouts/{id}" => handlers::delete_workout,
    });

    let todo_routes = routes!(D => {
        get "/todos" => handlers::list_todos,
        post "/todos" => handlers::create_todo,
        put "/todos/{id}" => handlers::update_todo,
        delete "/todos/{id}" => handlers::delete_todo,
    });

    let api_routes = system_routes.merge(workout_routes).merge(todo_routes);

    Router::new()
        .nest("/api", api_routes)
        .merge(Scalar::with_url("/docs", api))
        .fallback(static_assets::serve_frontend)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
