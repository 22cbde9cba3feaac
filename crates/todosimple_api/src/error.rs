//! API error type and its HTTP mapping.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde::Serialize;
use thiserror::Error;
use todosimple_core::{EntityKind, ServiceError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: i64 },

    #[error("{0}")]
    ReferentialConflict(String),

    #[error("username already taken: `{0}`")]
    UsernameTaken(String),

    #[error("{message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Details are logged, never sent to the client.
    #[error("internal server error")]
    Internal { message: String },
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::ReferentialConflict(_) | Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::UsernameTaken(_) => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound {
                entity: EntityKind::User,
                ..
            } => "USER_NOT_FOUND",
            Self::NotFound {
                entity: EntityKind::Task,
                ..
            } => "TASK_NOT_FOUND",
            Self::ReferentialConflict(_) => "REFERENTIAL_CONFLICT",
            Self::UsernameTaken(_) => "USERNAME_TAKEN",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::UserNotFound(id) => Self::NotFound {
                entity: EntityKind::User,
                id,
            },
            ServiceError::TaskNotFound(id) => Self::NotFound {
                entity: EntityKind::Task,
                id,
            },
            err @ ServiceError::ReferentialConflict { .. } => {
                Self::ReferentialConflict(err.to_string())
            }
            ServiceError::UsernameTaken(username) => Self::UsernameTaken(username),
            ServiceError::Validation(err) => Self::Validation {
                message: err.to_string(),
                field: Some(err.field().to_string()),
            },
            ServiceError::Repo(err) => Self::internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::validation(value.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        Self::validation(value.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal { message } = &self {
            error!("event=request_failed module=api status=error error={message}");
        }

        let status = self.status_code();
        let (message, field) = match &self {
            Self::Validation { message, field } => (message.clone(), field.clone()),
            other => (other.to_string(), None),
        };
        let body = ErrorBody {
            code: self.error_code(),
            message,
            field,
        };

        (status, Json(body)).into_response()
    }
}
