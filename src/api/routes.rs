//! API route configuration.

use axum::Router;
use axum::middleware;
use axum::routing::{delete, get, post, put};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::guard::enumeration_guard;
use super::handlers::{self, HealthResponse};
use super::state::AppState;
use super::v1::{self, CreateTodoRequest, TodoResponse, UpdateTodoRequest};
use crate::db::Database;

/// Build routes with generic database type.
///
/// Registers each handler with the turbofish applied, under both the bare
/// path and its trailing-slash form.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router
                .route($path, $method($($handler)::+::<$D>))
                .route(concat!($path, "/"), $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo API",
        version = "0.1.0",
        description = "Todo tracking with filtered listing and a due-date agenda",
        license(name = "GPL-2.0")
    ),
    paths(
        handlers::health,
        v1::list_todos,
        v1::get_todo,
        v1::create_todo,
        v1::update_todo,
        v1::delete_todo,
        v1::agenda,
    ),
    components(
        schemas(
            HealthResponse,
            TodoResponse,
            CreateTodoRequest,
            UpdateTodoRequest,
        )
    ),
    tags(
        (name = "system", description = "System health endpoints"),
        (name = "todos", description = "Todo management endpoints"),
        (name = "agenda", description = "Todos by due date")
    )
)]
pub struct ApiDoc;

/// Create the API router with OpenAPI documentation
pub fn create_router<D: Database + 'static>(state: AppState<D>) -> Router {
    let api = ApiDoc::openapi();

    let system_routes = Router::new().route("/health", get(handlers::health));

    // Every todo route passes the enumeration guard first
    let todo_routes = routes!(D => {
        get "/todos" => v1::list_todos,
        post "/todos" => v1::create_todo,
        get "/todos/{id}" => v1::get_todo,
        put "/todos/{id}" => v1::update_todo,
        delete "/todos/{id}" => v1::delete_todo,
        get "/agenda" => v1::agenda,
    })
    .route_layer(middleware::from_fn(enumeration_guard));

    system_routes
        .merge(todo_routes)
        .merge(Scalar::with_url("/docs", api))
        .with_state(state)
}
