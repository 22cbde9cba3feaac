//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist and load rows of the `task` table.
//! - Resolve the owner's username on reads via a join on `user`.
//!
//! # Invariants
//! - `task.user_id` is written once on insert and never updated.
//! - Listing by owner is ordered by `id ASC`.

use crate::model::task::{Task, TaskId, TaskOwner};
use crate::model::user::UserId;
use crate::model::validation::ValidationError;
use crate::repo::{run_atomically, RepoError, RepoResult, UnitOfWork};
use rusqlite::{params, Connection, OptionalExtension, Row};

const TASK_TABLE: &str = "task";

const TASK_SELECT_SQL: &str = r#"SELECT
    t.id AS id,
    t.description AS description,
    t.user_id AS user_id,
    u.username AS username
FROM task t
INNER JOIN "user" u ON u.id = t.user_id"#;

/// Repository interface for task rows.
pub trait TaskRepository: UnitOfWork {
    /// Loads one task with its owner reference, `None` when absent.
    fn find_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    /// Lists every task whose owner is `user_id`.
    fn find_tasks_by_user(&self, user_id: UserId) -> RepoResult<Vec<Task>>;
    /// Inserts a new task and returns it with the assigned identifier.
    fn insert_task(&self, task: &Task) -> RepoResult<Task>;
    /// Overwrites the stored description of `task.id`.
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    /// Deletes one task row.
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl UnitOfWork for SqliteTaskRepository<'_> {
    fn atomically<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<RepoError>,
    {
        run_atomically(self.conn, work)
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn find_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        self.conn
            .query_row(&format!("{TASK_SELECT_SQL} WHERE t.id = ?1;"), [id], |row| {
                Ok(read_task_row(row))
            })
            .optional()?
            .transpose()
    }

    fn find_tasks_by_user(&self, user_id: UserId) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE t.user_id = ?1
             ORDER BY t.id ASC;"
        ))?;

        let mut rows = stmt.query([user_id])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(read_task_row(row)?);
        }

        Ok(tasks)
    }

    fn insert_task(&self, task: &Task) -> RepoResult<Task> {
        task.validate_for_create()?;

        self.conn.execute(
            "INSERT INTO task (description, user_id) VALUES (?1, ?2);",
            params![task.description.as_str(), task.user.id],
        )?;

        Ok(Task {
            id: Some(self.conn.last_insert_rowid()),
            description: task.description.clone(),
            user: task.user.clone(),
        })
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;
        let id = task.id.ok_or(ValidationError::MissingField("id"))?;

        let changed = self.conn.execute(
            "UPDATE task SET description = ?1 WHERE id = ?2;",
            params![task.description.as_str(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                table: TASK_TABLE,
                id,
            });
        }

        Ok(())
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM task WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                table: TASK_TABLE,
                id,
            });
        }

        Ok(())
    }
}

fn read_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let task = Task {
        id: Some(row.get("id")?),
        description: row.get("description")?,
        user: TaskOwner {
            id: row.get("user_id")?,
            username: Some(row.get("username")?),
        },
    };
    task.validate().map_err(|err| {
        RepoError::InvalidData(format!("task {}: {err}", task.id.unwrap_or_default()))
    })?;
    Ok(task)
}
