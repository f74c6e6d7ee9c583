//! Task status lifecycle.
//!
//! Every status may move to every other status, including itself. The
//! only governed behaviour is the completion date: entering `Done` stamps
//! today's date unless one is already recorded, and leaving `Done` clears
//! it.

use crate::validation::{Field, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not started. Every task starts here.
    #[default]
    Todo,
    /// Being worked on.
    InProgress,
    /// Started and set aside.
    Paused,
    /// Finished. May be reopened.
    Done,
}

impl TaskStatus {
    /// Every status in lifecycle order.
    pub const ALL: [Self; 4] = [Self::Todo, Self::InProgress, Self::Paused, Self::Done];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::Paused => "PAUSED",
            Self::Done => "DONE",
        }
    }

    /// Returns whether moving from `self` to `_target` is allowed.
    ///
    /// Every status may move to every other status, itself included.
    #[must_use]
    #[expect(
        clippy::unused_self,
        reason = "the lifecycle permits every transition regardless of origin"
    )]
    pub const fn can_transition_to(self, _target: Self) -> bool {
        true
    }

    /// Returns whether the status counts as completed.
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }

    /// Computes the completion date a task has after entering `self`.
    ///
    /// `previous` is the completion date recorded before the change.
    #[must_use]
    pub const fn completion_date(
        self,
        previous: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Option<NaiveDate> {
        match (self, previous) {
            (Self::Done, Some(existing)) => Some(existing),
            (Self::Done, None) => Some(today),
            _ => None,
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "TODO" => Ok(Self::Todo),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "PAUSED" => Ok(Self::Paused),
            "DONE" => Ok(Self::Done),
            _ => Err(ValidationError::UnknownValue {
                field: Field::Status,
                value: value.to_owned(),
            }),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a status change applied to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTransition {
    /// Status before the change.
    pub from: TaskStatus,
    /// Status after the change.
    pub to: TaskStatus,
    /// Completion date after the change.
    pub completed_at: Option<NaiveDate>,
}

impl StatusTransition {
    /// Returns whether the change kept the same status.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}
