//! Validated text values carried by a project.

use crate::validation::{ValidationError, rules};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Project name of 3 to 200 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    /// Creates a validated project name.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] produced by
    /// [`rules::validate_project_name`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        rules::validate_project_name(&raw)?;
        Ok(Self(raw))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-text project description of at most 1000 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectDescription(String);

impl ProjectDescription {
    /// Creates a validated project description.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TooLong`] past
    /// [`rules::PROJECT_DESCRIPTION_MAX_LEN`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        rules::validate_description(Some(&raw), rules::PROJECT_DESCRIPTION_MAX_LEN)?;
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

impl fmt::Display for ProjectDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
