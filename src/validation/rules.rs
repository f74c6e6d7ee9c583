//! Individual validation rule implementations.
//!
//! Each rule is a pure function. Text lengths are measured in Unicode
//! scalar values and checked against the raw input; surrounding
//! whitespace only matters for the blank check.

use super::{Field, ValidationError};
use crate::task::domain::{Priority, TaskStatus};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

/// Shortest accepted username.
pub const USERNAME_MIN_LEN: usize = 3;
/// Longest accepted username.
pub const USERNAME_MAX_LEN: usize = 50;
/// Longest accepted email address.
pub const EMAIL_MAX_LEN: usize = 255;
/// Shortest accepted project name or task title.
pub const NAME_MIN_LEN: usize = 3;
/// Longest accepted project name or task title.
pub const NAME_MAX_LEN: usize = 200;
/// Longest accepted project description.
pub const PROJECT_DESCRIPTION_MAX_LEN: usize = 1000;
/// Longest accepted task description.
pub const TASK_DESCRIPTION_MAX_LEN: usize = 2000;

#[expect(
    clippy::expect_used,
    reason = "the pattern is a literal and is covered by unit tests"
)]
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email pattern")
});

/// Validates a raw user identifier.
///
/// # Errors
///
/// Returns [`ValidationError::NonPositiveId`] when the value is not
/// strictly positive.
pub const fn validate_user_id(value: i64) -> Result<(), ValidationError> {
    validate_positive_id(Field::UserId, value)
}

/// Validates a raw project identifier.
///
/// # Errors
///
/// Returns [`ValidationError::NonPositiveId`] when the value is not
/// strictly positive.
pub const fn validate_project_id(value: i64) -> Result<(), ValidationError> {
    validate_positive_id(Field::ProjectId, value)
}

/// Validates a raw task identifier.
///
/// # Errors
///
/// Returns [`ValidationError::NonPositiveId`] when the value is not
/// strictly positive.
pub const fn validate_task_id(value: i64) -> Result<(), ValidationError> {
    validate_positive_id(Field::TaskId, value)
}

const fn validate_positive_id(field: Field, value: i64) -> Result<(), ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NonPositiveId { field, value });
    }
    Ok(())
}

/// Validates a username: 3 to 50 characters from `[A-Za-z0-9_]`.
///
/// # Errors
///
/// Returns [`ValidationError::Blank`], [`ValidationError::TooShort`],
/// [`ValidationError::TooLong`] or [`ValidationError::InvalidUsername`].
pub fn validate_username(value: &str) -> Result<(), ValidationError> {
    validate_bounded_text(Field::Username, value, USERNAME_MIN_LEN, USERNAME_MAX_LEN)?;
    let allowed = value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '_');
    if !allowed {
        return Err(ValidationError::InvalidUsername(value.to_owned()));
    }
    Ok(())
}

/// Validates an email address against the `local@domain.tld` pattern.
///
/// # Errors
///
/// Returns [`ValidationError::Blank`], [`ValidationError::TooLong`] or
/// [`ValidationError::InvalidEmail`].
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank {
            field: Field::Email,
        });
    }
    validate_max_len(Field::Email, value, EMAIL_MAX_LEN)?;
    if !EMAIL_PATTERN.is_match(value) {
        return Err(ValidationError::InvalidEmail(value.to_owned()));
    }
    Ok(())
}

/// Validates a project name: non-blank, 3 to 200 characters.
///
/// # Errors
///
/// Returns [`ValidationError::Blank`], [`ValidationError::TooShort`] or
/// [`ValidationError::TooLong`].
pub fn validate_project_name(value: &str) -> Result<(), ValidationError> {
    validate_bounded_text(Field::ProjectName, value, NAME_MIN_LEN, NAME_MAX_LEN)
}

/// Validates a task title: non-blank, 3 to 200 characters.
///
/// # Errors
///
/// Returns [`ValidationError::Blank`], [`ValidationError::TooShort`] or
/// [`ValidationError::TooLong`].
pub fn validate_task_title(value: &str) -> Result<(), ValidationError> {
    validate_bounded_text(Field::TaskTitle, value, NAME_MIN_LEN, NAME_MAX_LEN)
}

/// Validates an optional description against `max_len`.
///
/// An absent description is always accepted.
///
/// # Errors
///
/// Returns [`ValidationError::TooLong`] when the description exceeds
/// `max_len` characters.
pub fn validate_description(value: Option<&str>, max_len: usize) -> Result<(), ValidationError> {
    match value {
        Some(text) => validate_max_len(Field::Description, text, max_len),
        None => Ok(()),
    }
}

/// Requires a value to be present.
///
/// # Errors
///
/// Returns [`ValidationError::Missing`] naming `field` when `value` is
/// `None`.
pub fn validate_required<T>(field: Field, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::Missing { field })
}

/// Parses a required priority from raw text.
///
/// # Errors
///
/// Returns [`ValidationError::Missing`] when the value is absent or blank
/// and [`ValidationError::UnknownValue`] when it names no priority.
pub fn validate_priority(value: Option<&str>) -> Result<Priority, ValidationError> {
    let raw = required_text(Field::Priority, value)?;
    Priority::try_from(raw)
}

/// Parses a required task status from raw text.
///
/// # Errors
///
/// Returns [`ValidationError::Missing`] when the value is absent or blank
/// and [`ValidationError::UnknownValue`] when it names no status.
pub fn validate_status(value: Option<&str>) -> Result<TaskStatus, ValidationError> {
    let raw = required_text(Field::Status, value)?;
    TaskStatus::try_from(raw)
}

/// Validates an optional deadline against the current date.
///
/// A deadline on `today` is accepted; only strictly earlier dates fail.
///
/// # Errors
///
/// Returns [`ValidationError::DeadlineInPast`] when `deadline < today`.
pub fn validate_deadline(
    deadline: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    match deadline {
        Some(date) if date < today => Err(ValidationError::DeadlineInPast {
            deadline: date,
            today,
        }),
        _ => Ok(()),
    }
}

/// Validates a look-ahead window and returns it as an unsigned count.
///
/// # Errors
///
/// Returns [`ValidationError::NegativeDayCount`] for negative input.
pub fn validate_day_count(days: i64) -> Result<u64, ValidationError> {
    u64::try_from(days).map_err(|_| ValidationError::NegativeDayCount(days))
}

fn required_text(field: Field, value: Option<&str>) -> Result<&str, ValidationError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(ValidationError::Missing { field }),
    }
}

fn validate_bounded_text(
    field: Field,
    value: &str,
    min_len: usize,
    max_len: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    let actual = value.chars().count();
    if actual < min_len {
        return Err(ValidationError::TooShort {
            field,
            min: min_len,
            actual,
        });
    }
    validate_max_len(field, value, max_len)
}

fn validate_max_len(field: Field, value: &str, max_len: usize) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max_len {
        return Err(ValidationError::TooLong {
            field,
            max: max_len,
            actual,
        });
    }
    Ok(())
}
