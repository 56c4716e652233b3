//! Agenda handler: todos due on a given date.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use tracing::instrument;
use utoipa::IntoParams;

use super::TodoResponse;
use crate::api::{ApiError, AppState, ValidationError};
use crate::db::{Database, DueDate, TodoRepository};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AgendaQuery {
    /// Due date in yyyy-MM-dd form (required)
    #[param(example = "2021-12-12")]
    pub date: Option<String>,
}

#[utoipa::path(
    get,
    path = "/agenda/",
    tag = "agenda",
    params(AgendaQuery),
    responses(
        (status = 200, description = "Todos due on the date", body = Vec<TodoResponse>),
        (status = 400, description = "Invalid Due Date", body = String),
        (status = 500, description = "Internal server error", body = String)
    )
)]
#[instrument(skip(state))]
pub async fn agenda<D: Database>(
    State(state): State<AppState<D>>,
    query: Result<Query<AgendaQuery>, QueryRejection>,
) -> Result<Json<Vec<TodoResponse>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let date: DueDate = query
        .date
        .as_deref()
        .and_then(|d| d.parse().ok())
        .ok_or(ValidationError::InvalidDueDate)?;

    let todos = state.db().todos().list_by_due_date(&date).await?;

    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}
