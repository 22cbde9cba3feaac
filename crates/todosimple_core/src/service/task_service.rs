//! Task use-case service.
//!
//! # Responsibility
//! - Look up tasks by identifier and by owning user.
//! - Create tasks bound to an existing user, edit their description, delete
//!   them.
//!
//! # Invariants
//! - A task is only created for a user resolved through `UserService`.
//! - The owner of a task never changes after creation.
//! - `find_all_by_user_id` does not check that the user exists; callers that
//!   need a 404 for unknown users check first.

use crate::model::task::{Task, TaskId, TaskOwner};
use crate::model::user::UserId;
use crate::model::validation::ValidationError;
use crate::repo::task_repo::TaskRepository;
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;
use crate::service::user_service::UserService;
use crate::service::{map_delete_error, EntityKind, ServiceError, ServiceResult};
use log::{info, warn};

/// Task service facade.
///
/// `repo` and the repository behind `users` must share one connection so a
/// create sees the owner lookup and the insert in the same transaction.
pub struct TaskService<T: TaskRepository, U: UserRepository> {
    repo: T,
    users: UserService<U>,
}

impl<T: TaskRepository, U: UserRepository> TaskService<T, U> {
    /// Creates a service from its repository and the user service used to
    /// resolve owners.
    pub fn new(repo: T, users: UserService<U>) -> Self {
        Self { repo, users }
    }

    /// User service used for owner resolution.
    pub fn users(&self) -> &UserService<U> {
        &self.users
    }

    /// Gets one task by identifier.
    pub fn find_by_id(&self, id: TaskId) -> ServiceResult<Task> {
        self.repo
            .find_task(id)?
            .ok_or(ServiceError::TaskNotFound(id))
    }

    /// Lists tasks owned by `user_id`, oldest first. Empty for unknown users.
    pub fn find_all_by_user_id(&self, user_id: UserId) -> ServiceResult<Vec<Task>> {
        Ok(self.repo.find_tasks_by_user(user_id)?)
    }

    /// Creates a task for the user referenced by `task.user.id`.
    ///
    /// # Errors
    /// - `Validation` for a missing or over-long description, or a missing
    ///   owner reference.
    /// - `UserNotFound` when the referenced user does not exist; nothing is
    ///   persisted.
    pub fn create(&self, task: &Task) -> ServiceResult<Task> {
        task.validate_for_create()?;
        let owner_id = task.user.id;

        let created = self.repo.atomically(|| -> ServiceResult<Task> {
            let owner = self.users.find_by_id(owner_id)?;
            let candidate = Task {
                id: None,
                description: task.description.clone(),
                user: TaskOwner::try_from(&owner)?,
            };
            self.repo
                .insert_task(&candidate)
                .map_err(|err| match err {
                    // Owner vanished between lookup and insert.
                    RepoError::ForeignKeyViolation(_) => ServiceError::UserNotFound(owner_id),
                    other => other.into(),
                })
        });

        match &created {
            Ok(task) => info!(
                "event=task_create module=service status=ok task_id={} user_id={owner_id}",
                task.id.unwrap_or_default()
            ),
            Err(ServiceError::UserNotFound(_)) => warn!(
                "event=task_create module=service status=rejected reason=user_not_found user_id={owner_id}"
            ),
            Err(_) => {}
        }
        created
    }

    /// Replaces the description of `task.id`; the owner in the input is
    /// ignored.
    ///
    /// Returns the stored record after the merge.
    pub fn update(&self, task: &Task) -> ServiceResult<Task> {
        task.validate()?;
        let id = task.id.ok_or(ValidationError::MissingField("id"))?;

        let updated = self.repo.atomically(|| -> ServiceResult<Task> {
            let mut existing = self.find_by_id(id)?;
            existing.description = task.description.clone();
            self.repo.update_task(&existing)?;
            Ok(existing)
        })?;

        info!("event=task_update module=service status=ok task_id={id}");
        Ok(updated)
    }

    /// Deletes one task.
    ///
    /// # Errors
    /// - `TaskNotFound` when no such task exists.
    /// - `ReferentialConflict` if storage reports the task as still referenced.
    pub fn delete(&self, id: TaskId) -> ServiceResult<()> {
        let deleted = self.repo.atomically(|| -> ServiceResult<()> {
            self.find_by_id(id)?;
            self.repo
                .delete_task(id)
                .map_err(|err| map_delete_error(EntityKind::Task, id, err))
        });

        if deleted.is_ok() {
            info!("event=task_delete module=service status=ok task_id={id}");
        }
        deleted
    }
}
