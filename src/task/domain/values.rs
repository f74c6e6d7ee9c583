//! Validated text values carried by a task.

use crate::validation::{ValidationError, rules};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task title of 3 to 200 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated task title.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] produced by
    /// [`rules::validate_task_title`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        rules::validate_task_title(&raw)?;
        Ok(Self(raw))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-text task description of at most 2000 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Creates a validated task description.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TooLong`] past
    /// [`rules::TASK_DESCRIPTION_MAX_LEN`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        rules::validate_description(Some(&raw), rules::TASK_DESCRIPTION_MAX_LEN)?;
        Ok(Self(raw))
    }

    /// Validates an optional raw description.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TooLong`] when a present description is
    /// too long.
    pub fn optional(value: Option<String>) -> Result<Option<Self>, ValidationError> {
        value.map(Self::new).transpose()
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
