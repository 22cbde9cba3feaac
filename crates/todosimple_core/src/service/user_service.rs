//! User use-case service.
//!
//! # Responsibility
//! - Look up users by identifier, failing with `UserNotFound`.
//! - Register users and change their password.
//! - Delete users that no task references.
//!
//! # Invariants
//! - `create` never trusts a client identifier.
//! - `update` changes the password only; the username is kept as stored.
//! - Username uniqueness is left to the storage constraint.

use crate::model::user::{User, UserId};
use crate::model::validation::ValidationError;
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;
use crate::service::{map_delete_error, EntityKind, ServiceError, ServiceResult};
use log::{info, warn};

/// User service facade over a repository implementation.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Gets one user by identifier.
    pub fn find_by_id(&self, id: UserId) -> ServiceResult<User> {
        self.repo
            .find_user(id)?
            .ok_or(ServiceError::UserNotFound(id))
    }

    /// Registers a user and returns it with its assigned identifier.
    ///
    /// # Errors
    /// - `Validation` when username or password break length rules.
    /// - `UsernameTaken` when storage rejects a duplicate username.
    pub fn create(&self, user: &User) -> ServiceResult<User> {
        let candidate = User {
            id: None,
            ..user.clone()
        };
        candidate.validate_for_create()?;

        let created = self.repo.atomically(|| {
            self.repo
                .insert_user(&candidate)
                .map_err(|err| match err {
                    RepoError::UniqueViolation(_) => {
                        ServiceError::UsernameTaken(candidate.username.clone())
                    }
                    other => other.into(),
                })
        });

        match &created {
            Ok(user) => info!(
                "event=user_create module=service status=ok user_id={}",
                user.id.unwrap_or_default()
            ),
            Err(ServiceError::UsernameTaken(_)) => {
                warn!("event=user_create module=service status=rejected reason=username_taken")
            }
            Err(err) => warn!("event=user_create module=service status=error error={err}"),
        }
        created
    }

    /// Replaces the password of `user.id`; every other input field is ignored.
    ///
    /// Returns the stored record after the merge.
    pub fn update(&self, user: &User) -> ServiceResult<User> {
        user.validate_for_update()?;
        let id = user.id.ok_or(ValidationError::MissingField("id"))?;

        let updated = self.repo.atomically(|| -> ServiceResult<User> {
            let mut existing = self.find_by_id(id)?;
            existing.password = user.password.clone();
            self.repo.update_user(&existing)?;
            Ok(existing)
        })?;

        info!("event=user_update module=service status=ok user_id={id}");
        Ok(updated)
    }

    /// Deletes one user.
    ///
    /// # Errors
    /// - `UserNotFound` when no such user exists.
    /// - `ReferentialConflict` while the user still owns tasks.
    pub fn delete(&self, id: UserId) -> ServiceResult<()> {
        let deleted = self.repo.atomically(|| -> ServiceResult<()> {
            self.find_by_id(id)?;
            self.repo
                .delete_user(id)
                .map_err(|err| map_delete_error(EntityKind::User, id, err))
        });

        match &deleted {
            Ok(()) => info!("event=user_delete module=service status=ok user_id={id}"),
            Err(ServiceError::ReferentialConflict { .. }) => warn!(
                "event=user_delete module=service status=rejected reason=referenced user_id={id}"
            ),
            Err(_) => {}
        }
        deleted
    }
}
