//! SQLite TodoRepository implementation.

use std::str::FromStr;

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use super::filter::{ListQuery, SELECT_TODO};
use crate::db::{DbError, DbResult, DueDate, Todo, TodoFilter, TodoRepository};

/// SQLx-backed todo repository.
pub struct SqliteTodoRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> TodoRepository for SqliteTodoRepository<'a> {
    async fn create(&self, todo: &Todo) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO todo (id, todo, priority, status, category, due_date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(todo.id)
        .bind(&todo.todo)
        .bind(todo.priority.as_str())
        .bind(todo.status.as_str())
        .bind(todo.category.as_str())
        .bind(todo.due_date.to_string())
        .execute(self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                DbError::AlreadyExists {
                    entity_type: "Todo".to_string(),
                    id: todo.id.to_string(),
                }
            }
            _ => DbError::Database {
                message: e.to_string(),
            },
        })?;

        Ok(())
    }

    async fn find(&self, id: i64) -> DbResult<Option<Todo>> {
        let sql = format!("{} WHERE id = ?", SELECT_TODO);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        row.as_ref().map(row_to_todo).transpose()
    }

    async fn get(&self, id: i64) -> DbResult<Todo> {
        self.find(id)
            .await?
            .ok_or_else(|| DbError::todo_not_found(id))
    }

    async fn list(&self, filter: &TodoFilter) -> DbResult<Vec<Todo>> {
        let query = ListQuery::for_filter(filter);

        let mut query_builder = sqlx::query(&query.sql);
        for value in &query.binds {
            query_builder = query_builder.bind(value);
        }

        let rows = query_builder
            .fetch_all(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        rows.iter().map(row_to_todo).collect()
    }

    async fn list_by_due_date(&self, date: &DueDate) -> DbResult<Vec<Todo>> {
        let sql = format!("{} WHERE due_date = ?", SELECT_TODO);
        let rows = sqlx::query(&sql)
            .bind(date.to_string())
            .fetch_all(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        rows.iter().map(row_to_todo).collect()
    }

    async fn update(&self, todo: &Todo) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE todo
            SET todo = ?, priority = ?, status = ?, category = ?, due_date = ?
            WHERE id = ?
            "#,
        )
        .bind(&todo.todo)
        .bind(todo.priority.as_str())
        .bind(todo.status.as_str())
        .bind(todo.category.as_str())
        .bind(todo.due_date.to_string())
        .bind(todo.id)
        .execute(self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        if result.rows_affected() == 0 {
            return Err(DbError::todo_not_found(todo.id));
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        sqlx::query("DELETE FROM todo WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        Ok(())
    }
}

/// Convert a database row to a Todo model.
fn row_to_todo(row: &SqliteRow) -> DbResult<Todo> {
    Ok(Todo {
        id: column(row, "id")?,
        todo: column(row, "todo")?,
        priority: parse_column(row, "priority")?,
        status: parse_column(row, "status")?,
        category: parse_column(row, "category")?,
        due_date: parse_column(row, "due_date")?,
    })
}

fn column<T>(row: &SqliteRow, name: &str) -> DbResult<T>
where
    T: for<'r> sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name).map_err(|e| DbError::InvalidData {
        message: format!("column '{}': {}", name, e),
    })
}

fn parse_column<T>(row: &SqliteRow, name: &str) -> DbResult<T>
where
    T: FromStr<Err = String>,
{
    let raw: String = column(row, name)?;
    raw.parse().map_err(|e| DbError::InvalidData {
        message: format!("column '{}': {}", name, e),
    })
}
