//! User domain model.
//!
//! # Invariants
//! - `id` is `None` until storage assigns one, then never changes.
//! - `username` is unique across users (enforced by storage).
//! - `password` is never serialized; it can only be written.
//! - Owned tasks are not stored here; query them through the task service.

use crate::model::validation::{require_length, ValidationError};
use serde::{Deserialize, Serialize};

/// Storage-assigned user identifier.
pub type UserId = i64;

pub const USERNAME_MIN_CHARS: usize = 2;
pub const USERNAME_MAX_CHARS: usize = 100;
pub const PASSWORD_MIN_CHARS: usize = 8;
pub const PASSWORD_MAX_CHARS: usize = 60;

/// Account that owns tasks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    /// Ignored on create; assigned by storage.
    #[serde(default)]
    pub id: Option<UserId>,
    /// Only read on create. Updates never change it.
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing)]
    pub password: String,
}

impl User {
    /// Creates an unsaved user.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            password: password.into(),
        }
    }

    /// Validates the fields required to register a user.
    pub fn validate_for_create(&self) -> Result<(), ValidationError> {
        require_length(
            "username",
            &self.username,
            USERNAME_MIN_CHARS,
            USERNAME_MAX_CHARS,
        )?;
        self.validate_for_update()
    }

    /// Validates the fields accepted by a user update (password only).
    pub fn validate_for_update(&self) -> Result<(), ValidationError> {
        require_length(
            "password",
            &self.password,
            PASSWORD_MIN_CHARS,
            PASSWORD_MAX_CHARS,
        )
    }
}
