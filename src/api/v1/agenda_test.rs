//! Integration tests for the agenda endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::api::{AppState, routes};
use crate::db::{Database, SqliteDatabase};

async fn test_app() -> axum::Router {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create test database");
    db.init_schema().await.expect("Failed to create schema");

    let app = routes::create_router(AppState::new(db));
    for (id, due) in [(1, "2021-12-12"), (2, "2021-02-22"), (3, "2021-12-12")] {
        let todo = json!({
            "id": id,
            "todo": format!("todo {}", id),
            "priority": "LOW",
            "status": "TO DO",
            "category": "HOME",
            "dueDate": due
        });
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/todos/")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&todo).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    app
}

async fn get(app: &axum::Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

#[tokio::test(flavor = "multi_thread")]
async fn agenda_lists_todos_due_on_date() {
    let app = test_app().await;

    let response = get(&app, "/agenda/?date=2021-12-12").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|t| t["dueDate"] == "2021-12-12"));
    assert_eq!(items[0]["id"], 1);
    assert_eq!(items[1]["id"], 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn agenda_without_trailing_slash() {
    let app = test_app().await;

    let response = get(&app, "/agenda?date=2021-02-22").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn agenda_with_no_matches_is_empty() {
    let app = test_app().await;

    let response = get(&app, "/agenda/?date=2030-01-01").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn agenda_rejects_impossible_date() {
    let app = test_app().await;

    let response = get(&app, "/agenda/?date=2024-13-40").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_bytes(response).await, b"Invalid Due Date");
}

#[tokio::test(flavor = "multi_thread")]
async fn agenda_requires_date() {
    let app = test_app().await;

    let response = get(&app, "/agenda/").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_bytes(response).await, b"Invalid Due Date");
}
