//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist and load rows of the `user` table.
//! - Report username collisions and still-referenced deletes as typed errors.
//!
//! # Invariants
//! - Inserts ignore any identifier on the input record; SQLite assigns it.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::model::user::{User, UserId};
use crate::model::validation::ValidationError;
use crate::repo::{run_atomically, RepoError, RepoResult, UnitOfWork};
use rusqlite::{params, Connection, OptionalExtension, Row};

const USER_TABLE: &str = "user";

/// Repository interface for user rows.
pub trait UserRepository: UnitOfWork {
    /// Loads one user, `None` when absent.
    fn find_user(&self, id: UserId) -> RepoResult<Option<User>>;
    /// Inserts a new user and returns it with the assigned identifier.
    fn insert_user(&self, user: &User) -> RepoResult<User>;
    /// Overwrites the stored username and password of `user.id`.
    fn update_user(&self, user: &User) -> RepoResult<()>;
    /// Deletes one user row.
    fn delete_user(&self, id: UserId) -> RepoResult<()>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl UnitOfWork for SqliteUserRepository<'_> {
    fn atomically<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<RepoError>,
    {
        run_atomically(self.conn, work)
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn find_user(&self, id: UserId) -> RepoResult<Option<User>> {
        self.conn
            .query_row(
                r#"SELECT id, username, password FROM "user" WHERE id = ?1;"#,
                [id],
                |row| Ok(read_user_row(row)),
            )
            .optional()?
            .transpose()
    }

    fn insert_user(&self, user: &User) -> RepoResult<User> {
        user.validate_for_create()?;

        self.conn.execute(
            r#"INSERT INTO "user" (username, password) VALUES (?1, ?2);"#,
            params![user.username.as_str(), user.password.as_str()],
        )?;

        Ok(User {
            id: Some(self.conn.last_insert_rowid()),
            username: user.username.clone(),
            password: user.password.clone(),
        })
    }

    fn update_user(&self, user: &User) -> RepoResult<()> {
        user.validate_for_create()?;
        let id = user.id.ok_or(ValidationError::MissingField("id"))?;

        let changed = self.conn.execute(
            r#"UPDATE "user" SET username = ?1, password = ?2 WHERE id = ?3;"#,
            params![user.username.as_str(), user.password.as_str(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                table: USER_TABLE,
                id,
            });
        }

        Ok(())
    }

    fn delete_user(&self, id: UserId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(r#"DELETE FROM "user" WHERE id = ?1;"#, [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                table: USER_TABLE,
                id,
            });
        }

        Ok(())
    }
}

fn read_user_row(row: &Row<'_>) -> RepoResult<User> {
    let user = User {
        id: Some(row.get("id")?),
        username: row.get("username")?,
        password: row.get("password")?,
    };
    user.validate_for_create().map_err(|err| {
        RepoError::InvalidData(format!("user {}: {err}", user.id.unwrap_or_default()))
    })?;
    Ok(user)
}
