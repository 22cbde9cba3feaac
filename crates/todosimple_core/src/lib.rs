//! Core domain logic for todosimple.
//! Users own tasks; this crate enforces their invariants over SQLite.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskId, TaskOwner};
pub use model::user::{User, UserId};
pub use model::validation::ValidationError;
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult, UnitOfWork};
pub use service::task_service::TaskService;
pub use service::user_service::UserService;
pub use service::{EntityKind, ServiceError, ServiceResult};

/// SQLite-backed services sharing one connection.
pub type SqliteUserService<'conn> = UserService<SqliteUserRepository<'conn>>;
/// SQLite-backed task service sharing one connection with its user service.
pub type SqliteTaskService<'conn> =
    TaskService<SqliteTaskRepository<'conn>, SqliteUserRepository<'conn>>;

/// Builds the user and task services over one connection.
pub fn sqlite_services(
    conn: &rusqlite::Connection,
) -> (SqliteUserService<'_>, SqliteTaskService<'_>) {
    let users = UserService::new(SqliteUserRepository::new(conn));
    let tasks = TaskService::new(
        SqliteTaskRepository::new(conn),
        UserService::new(SqliteUserRepository::new(conn)),
    );
    (users, tasks)
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
