//! End-to-end HTTP checks against an in-memory database.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use todosimple_api::{create_router, AppState};
use todosimple_core::db::open_db_in_memory;
use tower::ServiceExt;

struct Reply {
    status: StatusCode,
    location: Option<String>,
    body: Value,
}

fn test_app() -> Router {
    create_router(AppState::new(open_db_in_memory().unwrap()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Reply {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|value| value.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    Reply {
        status,
        location,
        body,
    }
}

async fn create_alice(app: &Router) {
    let reply = send(
        app,
        Method::POST,
        "/users",
        Some(json!({ "username": "alice", "password": "secret123" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED);
}

#[tokio::test]
async fn health_reports_version() {
    let app = test_app();
    let reply = send(&app, Method::GET, "/health", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["status"], "ok");
    assert_eq!(reply.body["version"], todosimple_core::core_version());
}

#[tokio::test]
async fn created_user_is_readable_without_password() {
    let app = test_app();
    let created = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({ "username": "alice", "password": "secret123" })),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.location.as_deref(), Some("/users/1"));

    let fetched = send(&app, Method::GET, "/users/1", None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, json!({ "id": 1, "username": "alice" }));
}

#[tokio::test]
async fn client_supplied_user_id_is_ignored() {
    let app = test_app();
    let created = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({ "id": 42, "username": "alice", "password": "secret123" })),
    )
    .await;
    assert_eq!(created.location.as_deref(), Some("/users/1"));
}

#[tokio::test]
async fn update_changes_password_and_keeps_username() {
    let app = test_app();
    create_alice(&app).await;

    let updated = send(
        &app,
        Method::PUT,
        "/users/1",
        Some(json!({ "username": "mallory", "password": "another-secret" })),
    )
    .await;
    assert_eq!(updated.status, StatusCode::NO_CONTENT);

    let fetched = send(&app, Method::GET, "/users/1", None).await;
    assert_eq!(fetched.body["username"], "alice");
}

#[tokio::test]
async fn duplicate_username_is_a_conflict() {
    let app = test_app();
    create_alice(&app).await;

    let duplicate = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({ "username": "alice", "password": "different1" })),
    )
    .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.body["code"], "USERNAME_TAKEN");
}

#[tokio::test]
async fn invalid_user_fields_are_rejected() {
    let app = test_app();

    let short_password = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({ "username": "alice", "password": "short" })),
    )
    .await;
    assert_eq!(short_password.status, StatusCode::BAD_REQUEST);
    assert_eq!(short_password.body["code"], "VALIDATION_ERROR");
    assert_eq!(short_password.body["field"], "password");

    let missing_username = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({ "password": "secret123" })),
    )
    .await;
    assert_eq!(missing_username.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing_username.body["field"], "username");

    let update_unknown_with_bad_password = send(
        &app,
        Method::PUT,
        "/users/99",
        Some(json!({ "password": "short" })),
    )
    .await;
    assert_eq!(
        update_unknown_with_bad_password.status,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let app = test_app();

    let fetched = send(&app, Method::GET, "/users/7", None).await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
    assert_eq!(fetched.body["code"], "USER_NOT_FOUND");

    let deleted = send(&app, Method::DELETE, "/users/7", None).await;
    assert_eq!(deleted.status, StatusCode::NOT_FOUND);

    let updated = send(
        &app,
        Method::PUT,
        "/users/7",
        Some(json!({ "password": "secret123" })),
    )
    .await;
    assert_eq!(updated.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_requests_are_validation_errors() {
    let app = test_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bad_path = send(&app, Method::GET, "/users/abc", None).await;
    assert_eq!(bad_path.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_path.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn task_lifecycle_for_existing_user() {
    let app = test_app();
    create_alice(&app).await;

    let created = send(
        &app,
        Method::POST,
        "/tasks",
        Some(json!({ "description": "buy milk", "user": { "id": 1 } })),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.location.as_deref(), Some("/tasks/1"));

    let fetched = send(&app, Method::GET, "/tasks/1", None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["description"], "buy milk");
    assert_eq!(fetched.body["user"]["id"], 1);
    assert_eq!(fetched.body["user"]["username"], "alice");

    let updated = send(
        &app,
        Method::PUT,
        "/tasks/1",
        Some(json!({ "description": "buy oat milk", "user": { "id": 99 } })),
    )
    .await;
    assert_eq!(updated.status, StatusCode::NO_CONTENT);

    let listed = send(&app, Method::GET, "/tasks/user/1", None).await;
    assert_eq!(listed.status, StatusCode::OK);
    let tasks = listed.body.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["description"], "buy oat milk");
    assert_eq!(tasks[0]["user"]["id"], 1);
}

#[tokio::test]
async fn task_for_unknown_user_is_not_created() {
    let app = test_app();

    let created = send(
        &app,
        Method::POST,
        "/tasks",
        Some(json!({ "description": "orphan", "user": { "id": 5 } })),
    )
    .await;
    assert_eq!(created.status, StatusCode::NOT_FOUND);
    assert_eq!(created.body["code"], "USER_NOT_FOUND");

    let missing = send(&app, Method::GET, "/tasks/1", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["code"], "TASK_NOT_FOUND");

    let listed = send(&app, Method::GET, "/tasks/user/5", None).await;
    assert_eq!(listed.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn task_without_owner_is_a_validation_error() {
    let app = test_app();
    create_alice(&app).await;

    let created = send(
        &app,
        Method::POST,
        "/tasks",
        Some(json!({ "description": "buy milk" })),
    )
    .await;
    assert_eq!(created.status, StatusCode::BAD_REQUEST);
    assert_eq!(created.body["code"], "VALIDATION_ERROR");
    assert_eq!(created.body["field"], "user.id");
}

#[tokio::test]
async fn empty_task_list_for_user_without_tasks() {
    let app = test_app();
    create_alice(&app).await;

    let listed = send(&app, Method::GET, "/tasks/user/1", None).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body, json!([]));
}

#[tokio::test]
async fn user_with_tasks_cannot_be_deleted() {
    let app = test_app();
    create_alice(&app).await;
    send(
        &app,
        Method::POST,
        "/tasks",
        Some(json!({ "description": "buy milk", "user": { "id": 1 } })),
    )
    .await;

    let blocked = send(&app, Method::DELETE, "/users/1", None).await;
    assert_eq!(blocked.status, StatusCode::BAD_REQUEST);
    assert_eq!(blocked.body["code"], "REFERENTIAL_CONFLICT");

    let still_there = send(&app, Method::GET, "/users/1", None).await;
    assert_eq!(still_there.status, StatusCode::OK);

    let task_deleted = send(&app, Method::DELETE, "/tasks/1", None).await;
    assert_eq!(task_deleted.status, StatusCode::NO_CONTENT);

    let user_deleted = send(&app, Method::DELETE, "/users/1", None).await;
    assert_eq!(user_deleted.status, StatusCode::NO_CONTENT);

    let gone = send(&app, Method::GET, "/users/1", None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}
