//! Identifier type for projects.

use crate::validation::{ValidationError, rules};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage-assigned identifier of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(i64);

impl ProjectId {
    /// Creates a validated project identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositiveId`] when `value <= 0`.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        rules::validate_project_id(value)?;
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
