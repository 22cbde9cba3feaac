//! Router assembly.

use crate::handlers::{health, tasks, users};
use crate::middleware::log_requests;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::{middleware, Router};

/// Builds the full router over `state`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/users", post(users::create_user))
        .route(
            "/users/{id}",
            get(users::find_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/tasks", post(tasks::create_task))
        .route(
            "/tasks/{id}",
            get(tasks::find_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/tasks/user/{user_id}", get(tasks::find_tasks_by_user))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}
