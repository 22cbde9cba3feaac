//! Storage gateway: repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - Provide CRUD primitives over `user` and `task` rows.
//! - Isolate SQL details from the domain services.
//! - Classify constraint failures so services never inspect SQLite errors.
//!
//! # Invariants
//! - Write paths validate records before SQL mutations.
//! - Unique and foreign-key failures surface as dedicated `RepoError` kinds,
//!   decided by SQLite extended result codes, never by message text.
//! - `UnitOfWork::atomically` scopes must not nest.

use crate::db::DbError;
use crate::model::validation::ValidationError;
use rusqlite::{ffi, Connection, ErrorCode, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod task_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for user/task persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    /// Row addressed by a write does not exist.
    NotFound { table: &'static str, id: i64 },
    /// A `UNIQUE` (or primary key) constraint rejected the write.
    UniqueViolation(String),
    /// A `FOREIGN KEY` constraint rejected the write or delete.
    ForeignKeyViolation(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { table, id } => write!(f, "{table} row not found: {id}"),
            Self::UniqueViolation(detail) => write!(f, "unique constraint violated: {detail}"),
            Self::ForeignKeyViolation(detail) => {
                write!(f, "foreign key constraint violated: {detail}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. }
            | Self::UniqueViolation(_)
            | Self::ForeignKeyViolation(_)
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(failure, message) = &value {
            if failure.code == ErrorCode::ConstraintViolation {
                let detail = message
                    .clone()
                    .unwrap_or_else(|| failure.to_string());
                match failure.extended_code {
                    ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                        return Self::ForeignKeyViolation(detail);
                    }
                    ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                        return Self::UniqueViolation(detail);
                    }
                    _ => {}
                }
            }
        }
        Self::Db(DbError::Sqlite(value))
    }
}

/// Runs a closure as one atomic unit against the backing store.
///
/// Every statement issued through the implementing repository inside `work`
/// commits together, or not at all when `work` returns `Err`.
pub trait UnitOfWork {
    fn atomically<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<RepoError>;
}

/// Shared SQLite implementation of [`UnitOfWork::atomically`].
///
/// Uses an immediate transaction so the write lock is taken up front.
pub(crate) fn run_atomically<T, E, F>(conn: &Connection, work: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
    E: From<RepoError>,
{
    let tx = rusqlite::Transaction::new_unchecked(conn, TransactionBehavior::Immediate)
        .map_err(RepoError::from)?;
    // Dropping `tx` on the error path rolls back.
    let value = work()?;
    tx.commit().map_err(RepoError::from)?;
    Ok(value)
}
