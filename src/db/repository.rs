//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing the handlers.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{DueDate, Todo, TodoFilter},
};

/// Repository for Todo operations.
pub trait TodoRepository {
    /// Insert a fully specified todo. Fails with AlreadyExists on a duplicate id.
    fn create(&self, todo: &Todo) -> impl Future<Output = DbResult<()>> + Send;

    /// Fetch a todo by ID, `None` when absent.
    fn find(&self, id: i64) -> impl Future<Output = DbResult<Option<Todo>>> + Send;

    /// Fetch a todo by ID, NotFound when absent.
    fn get(&self, id: i64) -> impl Future<Output = DbResult<Todo>> + Send;

    /// List todos matching the filter combination selected for `filter`.
    fn list(&self, filter: &TodoFilter) -> impl Future<Output = DbResult<Vec<Todo>>> + Send;

    /// List todos due on `date`.
    fn list_by_due_date(&self, date: &DueDate)
    -> impl Future<Output = DbResult<Vec<Todo>>> + Send;

    /// Overwrite every field of an existing todo. NotFound when no row matched.
    fn update(&self, todo: &Todo) -> impl Future<Output = DbResult<()>> + Send;

    /// Delete a todo by ID. Deleting an absent ID succeeds.
    fn delete(&self, id: i64) -> impl Future<Output = DbResult<()>> + Send;
}

/// Combined database interface.
pub trait Database: Send + Sync {
    type Todos<'a>: TodoRepository + Send + Sync
    where
        Self: 'a;

    /// Create the `todo` table if it does not exist yet.
    fn init_schema(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the todo repository.
    fn todos(&self) -> Self::Todos<'_>;

    /// Close every connection, waiting for in-flight statements.
    fn close(&self) -> impl Future<Output = ()> + Send;
}
