//! Identifier type for user accounts.

use crate::validation::{ValidationError, rules};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage-assigned identifier of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Creates a validated user identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositiveId`] when `value <= 0`.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        rules::validate_user_id(value)?;
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
