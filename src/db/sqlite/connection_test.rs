//! Tests for SQLite database connection and schema setup.

use crate::db::{Database, SqliteDatabase, TodoRepository};

#[tokio::test(flavor = "multi_thread")]
async fn init_schema_creates_todo_table() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");

    db.init_schema().await.expect("Schema setup should succeed");

    let columns: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info('todo')")
        .fetch_all(db.pool())
        .await
        .expect("Query should succeed");

    assert_eq!(
        columns,
        vec!["id", "todo", "priority", "status", "category", "due_date"]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn init_schema_is_idempotent() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");

    db.init_schema().await.expect("First run should succeed");
    db.init_schema().await.expect("Second run should succeed");

    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'todo'",
    )
    .fetch_one(db.pool())
    .await
    .expect("Query should succeed");
    assert_eq!(count, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn file_database_persists_across_reopen() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("todoApplication.db");

    let db = SqliteDatabase::open(&path)
        .await
        .expect("Open should create the file");
    db.init_schema().await.expect("Schema setup should succeed");
    sqlx::query(
        "INSERT INTO todo (id, todo, priority, status, category, due_date) VALUES (1, 'Learn Rust', 'HIGH', 'IN PROGRESS', 'LEARNING', '2024-03-01')",
    )
    .execute(db.pool())
    .await
    .expect("Insert should succeed");
    db.close().await;

    assert!(path.exists());

    let reopened = SqliteDatabase::open(&path)
        .await
        .expect("Reopen should succeed");
    let todo = reopened.todos().get(1).await.expect("Todo should survive");
    assert_eq!(todo.todo, "Learn Rust");
    assert_eq!(todo.due_date.to_string(), "2024-03-01");
}

#[tokio::test(flavor = "multi_thread")]
async fn queries_before_schema_fail_with_database_error() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");

    let result = db.todos().get(1).await;
    assert!(matches!(result, Err(crate::db::DbError::Database { .. })));
}
