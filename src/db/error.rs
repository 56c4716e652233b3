//! Database error types.
//!
//! Storage-backend agnostic errors for todo persistence, using miette for
//! diagnostic output and thiserror for the derives.

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Entity not found: {entity_type} with id '{id}'")]
    #[diagnostic(code(todo_agenda::db::not_found))]
    NotFound { entity_type: String, id: String },

    #[error("Entity already exists: {entity_type} with id '{id}'")]
    #[diagnostic(code(todo_agenda::db::already_exists))]
    AlreadyExists { entity_type: String, id: String },

    #[error("Invalid data: {message}")]
    #[diagnostic(code(todo_agenda::db::invalid_data))]
    InvalidData { message: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(todo_agenda::db::database_error))]
    Database { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(code(todo_agenda::db::connection_error))]
    Connection { message: String },
}

impl DbError {
    /// NotFound for a todo identifier.
    pub fn todo_not_found(id: i64) -> Self {
        DbError::NotFound {
            entity_type: "Todo".to_string(),
            id: id.to_string(),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
