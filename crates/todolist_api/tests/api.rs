use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use todolist_api::{app, AppState, INTERNAL_MESSAGE};
use todolist_core::db::open_db_in_memory;
use todolist_core::TodoItemDto;
use tower::ServiceExt;

fn test_app() -> Router {
    app(AppState::new(open_db_in_memory().unwrap()))
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn error_message(response: axum::response::Response) -> String {
    let body: serde_json::Value = body_json(response).await;
    body["message"].as_str().unwrap().to_string()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

async fn create(app: &Router, body: &str) -> TodoItemDto {
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/api/todoitems", body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
}

async fn fetch(app: &Router, id: i64) -> TodoItemDto {
    let resp = app
        .clone()
        .oneshot(empty_request("GET", &format!("/api/todoitems/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await
}

// --- health ---

#[tokio::test]
async fn health_reports_ok() {
    let resp = test_app()
        .oneshot(empty_request("GET", "/health"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["ping"], "pong");
    assert!(!body["version"].as_str().unwrap().is_empty());
}

// --- list ---

#[tokio::test]
async fn list_empty() {
    let resp = test_app()
        .oneshot(empty_request("GET", "/api/todoitems"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let items: Vec<TodoItemDto> = body_json(resp).await;
    assert!(items.is_empty());
}

#[tokio::test]
async fn list_uses_camel_case_fields() {
    let app = test_app();
    create(&app, r#"{"description":"Buy milk","isCompleted":true}"#).await;

    let resp = app
        .oneshot(empty_request("GET", "/api/todoitems"))
        .await
        .unwrap();
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(
        body,
        serde_json::json!([{"id": 1, "description": "Buy milk", "isCompleted": true}])
    );
}

// --- create ---

#[tokio::test]
async fn create_returns_201_with_location() {
    let resp = test_app()
        .oneshot(json_request(
            "POST",
            "/api/todoitems",
            r#"{"description":"Buy milk"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(
        resp.headers().get(http::header::LOCATION).unwrap(),
        "/api/todoitems/1"
    );
    let item: TodoItemDto = body_json(resp).await;
    assert_eq!(item.id, 1);
    assert_eq!(item.description, "Buy milk");
    assert!(!item.is_completed);
}

#[tokio::test]
async fn create_with_empty_description_returns_400() {
    let app = test_app();
    for body in [r#"{"description":""}"#, r#"{"description":"   "}"#] {
        let resp = app
            .clone()
            .oneshot(json_request("POST", "/api/todoitems", body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_message(resp).await, "Description is required");
    }

    let resp = app
        .oneshot(empty_request("GET", "/api/todoitems"))
        .await
        .unwrap();
    let items: Vec<TodoItemDto> = body_json(resp).await;
    assert!(items.is_empty());
}

#[tokio::test]
async fn create_malformed_json_returns_400() {
    let resp = test_app()
        .oneshot(json_request("POST", "/api/todoitems", r#"{"isCompleted":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_duplicate_description_returns_400() {
    let app = test_app();
    create(&app, r#"{"description":"A"}"#).await;

    let resp = app
        .oneshot(json_request(
            "POST",
            "/api/todoitems",
            r#"{"description":"a"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(error_message(resp).await.contains("already exists"));
}

// --- get ---

#[tokio::test]
async fn get_not_found_returns_404() {
    let resp = test_app()
        .oneshot(empty_request("GET", "/api/todoitems/42"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(error_message(resp).await.contains("not found"));
}

#[tokio::test]
async fn get_non_numeric_id_returns_400() {
    let resp = test_app()
        .oneshot(empty_request("GET", "/api/todoitems/abc"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update ---

#[tokio::test]
async fn update_returns_204_and_replaces_fields() {
    let app = test_app();
    let created = create(&app, r#"{"description":"draft"}"#).await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/todoitems/{}", created.id),
            r#"{"description":"final","isCompleted":true}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());

    let loaded = fetch(&app, created.id).await;
    assert_eq!(loaded.description, "final");
    assert!(loaded.is_completed);
}

#[tokio::test]
async fn update_not_found_returns_400() {
    let resp = test_app()
        .oneshot(json_request(
            "PUT",
            "/api/todoitems/5",
            r#"{"description":"ghost"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_to_taken_description_returns_400() {
    let app = test_app();
    let first = create(&app, r#"{"description":"Item A"}"#).await;
    create(&app, r#"{"description":"Item B"}"#).await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/todoitems/{}", first.id),
            r#"{"description":"ITEM B"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(fetch(&app, first.id).await.description, "Item A");
}

#[tokio::test]
async fn update_with_empty_description_returns_400() {
    let app = test_app();
    let created = create(&app, r#"{"description":"keep"}"#).await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/todoitems/{}", created.id),
            r#"{"description":""}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(fetch(&app, created.id).await.description, "keep");
}

// --- complete ---

#[tokio::test]
async fn complete_scenario() {
    let app = test_app();
    let created = create(&app, r#"{"description":"Buy milk"}"#).await;
    assert_eq!(created.id, 1);
    assert!(!created.is_completed);

    let resp = app
        .clone()
        .oneshot(empty_request("PUT", "/api/todoitems/1/complete"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(fetch(&app, 1).await.is_completed);

    let resp = app
        .clone()
        .oneshot(empty_request("PUT", "/api/todoitems/1/complete"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(error_message(resp).await.contains("already marked as complete"));
}

#[tokio::test]
async fn complete_not_found_returns_400() {
    let resp = test_app()
        .oneshot(empty_request("PUT", "/api/todoitems/3/complete"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- internal failures ---

fn app_without_table() -> Router {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE todo_items;").unwrap();
    app(AppState::new(conn))
}

#[tokio::test]
async fn storage_failure_on_read_returns_generic_500() {
    let resp = app_without_table()
        .oneshot(empty_request("GET", "/api/todoitems"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let message = error_message(resp).await;
    assert_eq!(message, INTERNAL_MESSAGE);
    assert!(!message.contains("no such table"));
}

#[tokio::test]
async fn storage_failure_on_write_returns_generic_500() {
    let app = app_without_table();
    let requests = [
        json_request("POST", "/api/todoitems", r#"{"description":"Buy milk"}"#),
        json_request("PUT", "/api/todoitems/1", r#"{"description":"Buy milk"}"#),
        empty_request("PUT", "/api/todoitems/1/complete"),
    ];

    for request in requests {
        let resp = app.clone().oneshot(request).await.unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_message(resp).await, INTERNAL_MESSAGE);
    }
}
