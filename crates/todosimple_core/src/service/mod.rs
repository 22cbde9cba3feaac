//! Domain services for users and tasks.
//!
//! # Responsibility
//! - Enforce existence checks, narrow-update rules and referential integrity
//!   above the storage gateway.
//! - Translate storage failures into the domain error taxonomy.
//!
//! # Invariants
//! - Every create/update/delete runs inside one `UnitOfWork` scope.
//! - Services of one request share a single connection.

use crate::model::task::TaskId;
use crate::model::user::UserId;
use crate::model::validation::ValidationError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod task_service;
pub mod user_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Record kind named in domain errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Task,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Task => write!(f, "task"),
        }
    }
}

/// Domain error returned by user and task services.
#[derive(Debug)]
pub enum ServiceError {
    /// No user has this identifier.
    UserNotFound(UserId),
    /// No task has this identifier.
    TaskNotFound(TaskId),
    /// Delete blocked because other records still reference the target.
    ReferentialConflict { entity: EntityKind, id: i64 },
    /// Another user already holds this username.
    UsernameTaken(String),
    /// Input violates a field constraint.
    Validation(ValidationError),
    /// Storage failure with no domain meaning.
    Repo(RepoError),
}

impl ServiceError {
    /// Whether this error reports a missing user or task.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_) | Self::TaskNotFound(_))
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UserNotFound(id) => write!(f, "user not found: {id}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::ReferentialConflict { entity, id } => write!(
                f,
                "cannot delete {entity} {id}: it is still referenced by other records"
            ),
            Self::UsernameTaken(username) => write!(f, "username already taken: `{username}`"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound { table: "user", id } => Self::UserNotFound(id),
            RepoError::NotFound { table: "task", id } => Self::TaskNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Maps a failed delete, turning foreign-key violations into
/// [`ServiceError::ReferentialConflict`].
fn map_delete_error(entity: EntityKind, id: i64, err: RepoError) -> ServiceError {
    match err {
        RepoError::ForeignKeyViolation(_) => ServiceError::ReferentialConflict { entity, id },
        other => other.into(),
    }
}
