//! Todo management handlers.

use std::str::FromStr;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{info, instrument};
use utoipa::{IntoParams, ToSchema};

use crate::api::{ApiError, AppState, ValidationError, guard};
use crate::db::{
    Database, DueDate, FilterBranch, FilterColumn, Presence, Todo, TodoCategory, TodoFilter,
    TodoPatch, TodoPriority, TodoRepository, TodoStatus, resolve_update,
};

// =============================================================================
// DTOs
// =============================================================================

/// External representation of a todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TodoResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Learn Rust")]
    pub todo: String,
    #[schema(value_type = String, example = "HIGH")]
    pub priority: TodoPriority,
    #[schema(value_type = String, example = "TO DO")]
    pub status: TodoStatus,
    #[schema(value_type = String, example = "LEARNING")]
    pub category: TodoCategory,
    #[serde(rename = "dueDate")]
    #[schema(example = "2021-12-12")]
    pub due_date: String,
}

impl From<Todo> for TodoResponse {
    fn from(t: Todo) -> Self {
        Self {
            id: t.id,
            todo: t.todo,
            priority: t.priority,
            status: t.status,
            category: t.category,
            due_date: t.due_date.to_string(),
        }
    }
}

/// Create todo request DTO, every field is required.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTodoRequest {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Learn Rust")]
    pub todo: String,
    #[schema(value_type = String, example = "HIGH")]
    pub priority: TodoPriority,
    #[schema(value_type = String, example = "TO DO")]
    pub status: TodoStatus,
    #[schema(value_type = String, example = "LEARNING")]
    pub category: TodoCategory,
    #[serde(rename = "dueDate")]
    #[schema(value_type = String, example = "2021-12-12")]
    pub due_date: DueDate,
}

impl From<CreateTodoRequest> for Todo {
    fn from(req: CreateTodoRequest) -> Self {
        Self {
            id: req.id,
            todo: req.todo,
            priority: req.priority,
            status: req.status,
            category: req.category,
            due_date: req.due_date,
        }
    }
}

/// Update todo request DTO (partial update)
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateTodoRequest {
    #[schema(example = "Learn Rust properly")]
    pub todo: Option<String>,
    #[schema(value_type = Option<String>, example = "LOW")]
    pub priority: Option<TodoPriority>,
    #[schema(value_type = Option<String>, example = "DONE")]
    pub status: Option<TodoStatus>,
    #[schema(value_type = Option<String>, example = "WORK")]
    pub category: Option<TodoCategory>,
    #[serde(rename = "dueDate")]
    #[schema(value_type = Option<String>, example = "2021-01-12")]
    pub due_date: Option<DueDate>,
}

impl From<UpdateTodoRequest> for TodoPatch {
    fn from(req: UpdateTodoRequest) -> Self {
        Self {
            todo: req.todo,
            priority: req.priority,
            status: req.status,
            category: req.category,
            due_date: req.due_date,
        }
    }
}

/// List query, enumerated filters stay raw until the filter combination is known.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTodosQuery {
    /// Substring to search for in the todo text
    #[param(example = "buy")]
    pub search_q: Option<String>,
    /// Filter by status (TO DO, IN PROGRESS, DONE)
    #[param(example = "TO DO")]
    pub status: Option<String>,
    /// Filter by priority (HIGH, MEDIUM, LOW)
    #[param(example = "HIGH")]
    pub priority: Option<String>,
    /// Filter by category (WORK, HOME, LEARNING)
    #[param(example = "WORK")]
    pub category: Option<String>,
}

impl ListTodosQuery {
    /// Decode the filters the selected combination constrains.
    ///
    /// Filters outside the combination are dropped without being parsed.
    pub fn into_filter(self) -> Result<TodoFilter, ValidationError> {
        let branch = FilterBranch::select(Presence {
            status: self.status.is_some(),
            priority: self.priority.is_some(),
            category: self.category.is_some(),
        });

        let mut filter = TodoFilter {
            search_q: self.search_q.unwrap_or_default(),
            ..Default::default()
        };
        for column in branch.columns() {
            match column {
                FilterColumn::Status => {
                    filter.status =
                        parse_filter(self.status.as_deref(), ValidationError::InvalidStatus)?;
                }
                FilterColumn::Priority => {
                    filter.priority =
                        parse_filter(self.priority.as_deref(), ValidationError::InvalidPriority)?;
                }
                FilterColumn::Category => {
                    filter.category =
                        parse_filter(self.category.as_deref(), ValidationError::InvalidCategory)?;
                }
            }
        }
        Ok(filter)
    }
}

fn parse_filter<T: FromStr>(
    raw: Option<&str>,
    error: ValidationError,
) -> Result<Option<T>, ValidationError> {
    raw.map(|s| s.parse().map_err(|_| error)).transpose()
}

/// Decode a write payload once every enumerated field it carries is valid.
fn decode_payload<T: DeserializeOwned>(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<T, ApiError> {
    let Json(value) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    if let Value::Object(fields) = &value {
        guard::check_body_values(fields)?;
    }
    serde_json::from_value(value).map_err(|e| ApiError::BadRequest(e.to_string()))
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    get,
    path = "/todos/",
    tag = "todos",
    params(ListTodosQuery),
    responses(
        (status = 200, description = "Matching todos", body = Vec<TodoResponse>),
        (status = 400, description = "Invalid Todo Status, Priority or Category", body = String),
        (status = 500, description = "Internal server error", body = String)
    )
)]
#[instrument(skip(state))]
pub async fn list_todos<D: Database>(
    State(state): State<AppState<D>>,
    query: Result<Query<ListTodosQuery>, QueryRejection>,
) -> Result<Json<Vec<TodoResponse>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let filter = query.into_filter()?;

    let todos = state.db().todos().list(&filter).await?;

    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = i64, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "Todo found", body = TodoResponse),
        (status = 400, description = "Malformed ID", body = String),
        (status = 404, description = "Todo not found", body = String),
        (status = 500, description = "Internal server error", body = String)
    )
)]
#[instrument(skip(state))]
pub async fn get_todo<D: Database>(
    State(state): State<AppState<D>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<TodoResponse>, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let todo = state.db().todos().get(id).await?;

    Ok(Json(TodoResponse::from(todo)))
}

#[utoipa::path(
    post,
    path = "/todos/",
    tag = "todos",
    request_body = CreateTodoRequest,
    responses(
        (status = 200, description = "Todo Successfully Added", body = String),
        (status = 400, description = "Invalid field value", body = String),
        (status = 409, description = "Todo already exists", body = String),
        (status = 500, description = "Internal server error", body = String)
    )
)]
#[instrument(skip(state))]
pub async fn create_todo<D: Database>(
    State(state): State<AppState<D>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<&'static str, ApiError> {
    let req: CreateTodoRequest = decode_payload(body)?;
    let todo = Todo::from(req);

    state.db().todos().create(&todo).await?;
    info!(id = todo.id, "Created todo");

    Ok("Todo Successfully Added")
}

/// Partially update a todo
///
/// Fields present in the body replace the stored values, absent fields keep
/// theirs. The confirmation names the first present field in the order
/// status, priority, todo, category, dueDate.
#[utoipa::path(
    put,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = i64, Path, description = "Todo ID")),
    request_body = UpdateTodoRequest,
    responses(
        (status = 200, description = "e.g. Status Updated", body = String),
        (status = 400, description = "Invalid field value", body = String),
        (status = 404, description = "Todo not found", body = String),
        (status = 500, description = "Internal server error", body = String)
    )
)]
#[instrument(skip(state))]
pub async fn update_todo<D: Database>(
    State(state): State<AppState<D>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<String, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let req: UpdateTodoRequest = decode_payload(body)?;

    let todos = state.db().todos();
    let stored = todos.find(id).await?;
    let resolved = resolve_update(id, stored, TodoPatch::from(req))?;
    todos.update(&resolved.todo).await?;
    info!(id, field = ?resolved.primary, "Updated todo");

    Ok(resolved.message())
}

#[utoipa::path(
    delete,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = i64, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "Todo Deleted", body = String),
        (status = 400, description = "Malformed ID", body = String),
        (status = 500, description = "Internal server error", body = String)
    )
)]
#[instrument(skip(state))]
pub async fn delete_todo<D: Database>(
    State(state): State<AppState<D>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<&'static str, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    state.db().todos().delete(id).await?;
    info!(id, "Deleted todo");

    Ok("Todo Deleted")
}
