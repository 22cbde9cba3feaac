//! Field constraint checks shared by the user and task records.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Field constraint violation detected before any persistence attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is absent or empty.
    MissingField(&'static str),
    /// Field length (in characters) is outside the accepted range.
    LengthOutOfRange {
        field: &'static str,
        min: usize,
        max: usize,
        actual: usize,
    },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField(field) => field,
            Self::LengthOutOfRange { field, .. } => field,
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "`{field}` is required"),
            Self::LengthOutOfRange {
                field,
                min,
                max,
                actual,
            } => write!(
                f,
                "`{field}` must be between {min} and {max} characters, got {actual}"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Checks that `value` is present and its character count lies in `min..=max`.
pub(crate) fn require_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }

    let actual = value.chars().count();
    if actual < min || actual > max {
        return Err(ValidationError::LengthOutOfRange {
            field,
            min,
            max,
            actual,
        });
    }

    Ok(())
}
