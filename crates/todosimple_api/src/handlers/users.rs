//! `/users` endpoints.

use crate::error::ApiError;
use crate::handlers::created_at;
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use todosimple_core::{User, UserId};

/// `GET /users/{id}`: the user without its password.
pub async fn find_user(
    State(state): State<AppState>,
    path: Result<Path<UserId>, PathRejection>,
) -> Result<Json<User>, ApiError> {
    let Path(id) = path?;
    let user = state.with_users(move |users| users.find_by_id(id)).await?;
    Ok(Json(user))
}

/// `POST /users`: registers a user from `{ username, password }`.
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<User>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(user) = payload?;
    let created = state.with_users(move |users| users.create(&user)).await?;
    Ok(created_at(format!(
        "/users/{}",
        created.id.unwrap_or_default()
    )))
}

/// `PUT /users/{id}`: changes the password; a username in the body is ignored.
pub async fn update_user(
    State(state): State<AppState>,
    path: Result<Path<UserId>, PathRejection>,
    payload: Result<Json<User>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    let Json(mut user) = payload?;
    user.id = Some(id);
    state.with_users(move |users| users.update(&user)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /users/{id}`: rejected while the user still owns tasks.
pub async fn delete_user(
    State(state): State<AppState>,
    path: Result<Path<UserId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    state.with_users(move |users| users.delete(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
