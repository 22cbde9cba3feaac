//! `/tasks` endpoints.

use crate::error::ApiError;
use crate::handlers::created_at;
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use todosimple_core::{Task, TaskId, UserId};

pub async fn find_task(
    State(state): State<AppState>,
    path: Result<Path<TaskId>, PathRejection>,
) -> Result<Json<Task>, ApiError> {
    let Path(id) = path?;
    let task = state.with_tasks(move |tasks| tasks.find_by_id(id)).await?;
    Ok(Json(task))
}

/// `GET /tasks/user/{user_id}`: 404 for unknown users, otherwise their tasks.
pub async fn find_tasks_by_user(
    State(state): State<AppState>,
    path: Result<Path<UserId>, PathRejection>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let Path(user_id) = path?;
    let tasks = state
        .with_tasks(move |tasks| {
            tasks.users().find_by_id(user_id)?;
            tasks.find_all_by_user_id(user_id)
        })
        .await?;
    Ok(Json(tasks))
}

/// `POST /tasks`: creates a task from `{ description, user: { id } }`.
pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<Task>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(task) = payload?;
    let created = state.with_tasks(move |tasks| tasks.create(&task)).await?;
    Ok(created_at(format!(
        "/tasks/{}",
        created.id.unwrap_or_default()
    )))
}

/// `PUT /tasks/{id}`: changes the description; the owner never moves.
pub async fn update_task(
    State(state): State<AppState>,
    path: Result<Path<TaskId>, PathRejection>,
    payload: Result<Json<Task>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    let Json(mut task) = payload?;
    task.id = Some(id);
    state.with_tasks(move |tasks| tasks.update(&task)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_task(
    State(state): State<AppState>,
    path: Result<Path<TaskId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    state.with_tasks(move |tasks| tasks.delete(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
