//! SQLite connection pool and schema management.

use std::path::Path;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use super::SqliteTodoRepository;
use crate::db::{Database, DbError, DbResult};

const CREATE_TODO_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS todo (
    id INTEGER PRIMARY KEY,
    todo TEXT NOT NULL,
    priority TEXT NOT NULL,
    status TEXT NOT NULL,
    category TEXT NOT NULL,
    due_date TEXT NOT NULL
)
"#;

/// SQLite database implementation.
///
/// Opened once at startup and shared by every request through `AppState`.
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open (or create) a database file at the given path.
    pub async fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        info!(path = %path.as_ref().display(), "Opened SQLite database");
        Ok(Self { pool })
    }

    /// Create an in-memory database (useful for testing).
    ///
    /// Every `:memory:` connection is its own database, so the pool holds
    /// exactly one connection that never expires.
    pub async fn in_memory() -> DbResult<Self> {
        let options: SqliteConnectOptions =
            "sqlite::memory:".parse().map_err(|e: sqlx::Error| DbError::Connection {
                message: e.to_string(),
            })?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// Underlying pool, for tests and direct statements.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl Database for SqliteDatabase {
    type Todos<'a> = SqliteTodoRepository<'a>;

    async fn init_schema(&self) -> DbResult<()> {
        sqlx::query(CREATE_TODO_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        Ok(())
    }

    fn todos(&self) -> Self::Todos<'_> {
        SqliteTodoRepository { pool: &self.pool }
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
