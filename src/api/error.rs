//! API error types.
//!
//! Handler errors render as plain-text bodies with the matching status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use miette::Diagnostic;
use thiserror::Error;
use tracing::error;

use crate::db::DbError;

/// A rejected enumerated field or due date.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid Todo Status")]
    InvalidStatus,

    #[error("Invalid Todo Priority")]
    InvalidPriority,

    #[error("Invalid Todo Category")]
    InvalidCategory,

    #[error("Invalid Due Date")]
    InvalidDueDate,
}

/// Errors returned by request handlers and middleware.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    BadRequest(String),

    #[error("Todo Not Found")]
    NotFound,

    #[error("Todo Already Exists")]
    Conflict,

    #[error("Internal Server Error")]
    Store(DbError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { .. } => ApiError::NotFound,
            DbError::AlreadyExists { .. } => ApiError::Conflict,
            other => ApiError::Store(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Store(e) = &self {
            error!(error = %e, "Store failure while handling request");
        }
        (self.status(), self.to_string()).into_response()
    }
}

/// Errors that stop the server itself.
#[derive(Error, Diagnostic, Debug)]
pub enum ServeError {
    #[error("Failed to bind or serve: {0}")]
    #[diagnostic(code(todo_agenda::api::io))]
    Io(#[from] std::io::Error),
}
