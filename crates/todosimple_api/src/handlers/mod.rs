//! Request handlers, one module per resource.

pub mod health;
pub mod tasks;
pub mod users;

use axum::http::header::{HeaderName, LOCATION};
use axum::http::StatusCode;

/// `201 Created` pointing at the new resource.
pub(crate) fn created_at(location: String) -> (StatusCode, [(HeaderName, String); 1]) {
    (StatusCode::CREATED, [(LOCATION, location)])
}
