//! Validation error taxonomy.

use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// Input field a validation rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// User identifier.
    UserId,
    /// Project identifier.
    ProjectId,
    /// Task identifier.
    TaskId,
    /// Username.
    Username,
    /// Email address.
    Email,
    /// Project name.
    ProjectName,
    /// Task title.
    TaskTitle,
    /// Free-text description of a project or task.
    Description,
    /// Task priority.
    Priority,
    /// Task status.
    Status,
    /// Task deadline.
    Deadline,
    /// Day count used by look-ahead queries.
    Days,
}

impl Field {
    /// Returns the human-readable field label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserId => "user id",
            Self::ProjectId => "project id",
            Self::TaskId => "task id",
            Self::Username => "username",
            Self::Email => "email",
            Self::ProjectName => "project name",
            Self::TaskTitle => "task title",
            Self::Description => "description",
            Self::Priority => "priority",
            Self::Status => "status",
            Self::Deadline => "deadline",
            Self::Days => "days",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller input violating a field constraint.
///
/// Always recoverable and meant to be shown to the caller verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required value was not supplied.
    #[error("{field} is required")]
    Missing {
        /// The missing field.
        field: Field,
    },

    /// A required text value is empty or whitespace only.
    #[error("{field} must not be empty")]
    Blank {
        /// The blank field.
        field: Field,
    },

    /// A text value is shorter than its lower bound.
    #[error("{field} must be at least {min} characters, got {actual}")]
    TooShort {
        /// The offending field.
        field: Field,
        /// Minimum accepted length.
        min: usize,
        /// Supplied length.
        actual: usize,
    },

    /// A text value is longer than its upper bound.
    #[error("{field} must be at most {max} characters, got {actual}")]
    TooLong {
        /// The offending field.
        field: Field,
        /// Maximum accepted length.
        max: usize,
        /// Supplied length.
        actual: usize,
    },

    /// The username contains characters outside `[A-Za-z0-9_]`.
    #[error("username '{0}' may only contain letters, digits and underscores")]
    InvalidUsername(String),

    /// The email address does not match the accepted pattern.
    #[error("email '{0}' is not a valid address")]
    InvalidEmail(String),

    /// An identifier is zero or negative.
    #[error("{field} must be a positive integer, got {value}")]
    NonPositiveId {
        /// The identifier field.
        field: Field,
        /// Supplied value.
        value: i64,
    },

    /// A text value does not name a known enumeration member.
    #[error("unknown {field} '{value}'")]
    UnknownValue {
        /// The enumeration field.
        field: Field,
        /// Supplied text.
        value: String,
    },

    /// The deadline lies before the current date.
    #[error("deadline {deadline} is in the past (today is {today})")]
    DeadlineInPast {
        /// Supplied deadline.
        deadline: NaiveDate,
        /// Date the rule was evaluated on.
        today: NaiveDate,
    },

    /// A look-ahead day count is negative.
    #[error("days must not be negative, got {0}")]
    NegativeDayCount(i64),

    /// The username is already registered.
    #[error("username '{0}' already exists")]
    UsernameTaken(String),
}

impl ValidationError {
    /// Returns the field the error refers to.
    #[must_use]
    pub const fn field(&self) -> Field {
        match self {
            Self::Missing { field }
            | Self::Blank { field }
            | Self::TooShort { field, .. }
            | Self::TooLong { field, .. }
            | Self::NonPositiveId { field, .. }
            | Self::UnknownValue { field, .. } => *field,
            Self::InvalidUsername(_) | Self::UsernameTaken(_) => Field::Username,
            Self::InvalidEmail(_) => Field::Email,
            Self::DeadlineInPast { .. } => Field::Deadline,
            Self::NegativeDayCount(_) => Field::Days,
        }
    }
}
