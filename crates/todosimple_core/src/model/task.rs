//! Task domain model.
//!
//! # Invariants
//! - `user.id` must reference an existing user; it is fixed at creation.
//! - Storage ids start at 1, so an owner id of 0 means none was given.
//! - `description` holds 1..=255 characters.

use crate::model::user::{User, UserId};
use crate::model::validation::{require_length, ValidationError};
use serde::{Deserialize, Serialize};

/// Storage-assigned task identifier.
pub type TaskId = i64;

pub const DESCRIPTION_MIN_CHARS: usize = 1;
pub const DESCRIPTION_MAX_CHARS: usize = 255;

/// Reference from a task to its owning user.
///
/// Clients send `{ "id": .. }`; reads also carry the owner's username.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskOwner {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl TaskOwner {
    /// Reference by identifier only, as supplied by clients.
    pub fn by_id(id: UserId) -> Self {
        Self { id, username: None }
    }
}

impl TryFrom<&User> for TaskOwner {
    type Error = ValidationError;

    /// Fails for users that were never persisted.
    fn try_from(user: &User) -> Result<Self, Self::Error> {
        let id = user.id.ok_or(ValidationError::MissingField("user.id"))?;
        Ok(Self {
            id,
            username: Some(user.username.clone()),
        })
    }
}

/// Unit of work owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Task {
    /// Ignored on create; assigned by storage.
    #[serde(default)]
    pub id: Option<TaskId>,
    #[serde(default)]
    pub description: String,
    /// Only read on create. Updates never reassign a task.
    #[serde(default)]
    pub user: TaskOwner,
}

impl Task {
    /// Creates an unsaved task for `user_id`.
    pub fn new(description: impl Into<String>, user_id: UserId) -> Self {
        Self {
            id: None,
            description: description.into(),
            user: TaskOwner::by_id(user_id),
        }
    }

    /// Validates the description, the only client-editable field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_length(
            "description",
            &self.description,
            DESCRIPTION_MIN_CHARS,
            DESCRIPTION_MAX_CHARS,
        )
    }

    /// Validates a task about to be created: description plus owner reference.
    pub fn validate_for_create(&self) -> Result<(), ValidationError> {
        self.validate()?;
        if self.user.id <= 0 {
            return Err(ValidationError::MissingField("user.id"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskOwner};
    use crate::model::user::User;
    use crate::model::validation::ValidationError;

    #[test]
    fn client_payload_only_needs_owner_id() {
        let task: Task =
            serde_json::from_str(r#"{"description":"buy milk","user":{"id":1}}"#).unwrap();
        assert_eq!(task, Task::new("buy milk", 1));
    }

    #[test]
    fn owner_serializes_username_without_password() {
        let mut user = User::new("alice", "secret123");
        user.id = Some(1);
        let mut task = Task::new("buy milk", 1);
        task.id = Some(3);
        task.user = TaskOwner::try_from(&user).unwrap();

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 3,
                "description": "buy milk",
                "user": { "id": 1, "username": "alice" }
            })
        );
    }

    #[test]
    fn unsaved_user_cannot_own_a_task() {
        assert!(TaskOwner::try_from(&User::new("alice", "secret123")).is_err());
    }

    #[test]
    fn payload_without_owner_fails_create_validation() {
        let task: Task = serde_json::from_str(r#"{"description":"buy milk"}"#).unwrap();
        assert!(task.validate().is_ok());
        assert_eq!(
            task.validate_for_create(),
            Err(ValidationError::MissingField("user.id"))
        );
    }

    #[test]
    fn description_bounds() {
        assert!(Task::new("x", 1).validate().is_ok());
        assert!(Task::new("x".repeat(255), 1).validate().is_ok());
        assert!(Task::new("", 1).validate().is_err());
        assert!(Task::new("x".repeat(256), 1).validate().is_err());
    }
}
