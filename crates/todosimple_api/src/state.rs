//! Shared request state.

use crate::error::ApiError;
use rusqlite::Connection;
use std::sync::{Arc, Mutex, PoisonError};
use todosimple_core::{
    ServiceResult, SqliteTaskRepository, SqliteTaskService, SqliteUserRepository,
    SqliteUserService, TaskService, UserService,
};

/// State handed to every handler: one SQLite connection behind a mutex.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Wraps an opened, migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs `work` against the connection on the blocking pool.
    pub async fn run<T, F>(&self, work: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Connection) -> ServiceResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            // A panicking request already rolled its transaction back.
            let conn = db.lock().unwrap_or_else(PoisonError::into_inner);
            work(&conn).map_err(ApiError::from)
        })
        .await
        .map_err(|err| ApiError::internal(format!("database worker failed: {err}")))?
    }

    /// Runs `work` with a user service bound to the shared connection.
    pub async fn with_users<T, F>(&self, work: F) -> Result<T, ApiError>
    where
        F: FnOnce(&SqliteUserService<'_>) -> ServiceResult<T> + Send + 'static,
        T: Send + 'static,
    {
        self.run(move |conn| work(&UserService::new(SqliteUserRepository::new(conn))))
            .await
    }

    /// Runs `work` with a task service bound to the shared connection.
    pub async fn with_tasks<T, F>(&self, work: F) -> Result<T, ApiError>
    where
        F: FnOnce(&SqliteTaskService<'_>) -> ServiceResult<T> + Send + 'static,
        T: Send + 'static,
    {
        self.run(move |conn| {
            let users = UserService::new(SqliteUserRepository::new(conn));
            work(&TaskService::new(SqliteTaskRepository::new(conn), users))
        })
        .await
    }
}
