//! Task lifecycle events.

use crate::task::domain::{Task, TaskId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A completed task mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEvent {
    /// A task was stored for the first time.
    Created(Task),
    /// Title, description, priority or deadline changed.
    Updated(Task),
    /// The status was set, possibly to the same value.
    StatusChanged(Task),
    /// A task was removed, on its own or by a cascade.
    Deleted(TaskId),
}

impl TaskEvent {
    /// Returns the discriminant of the event.
    #[must_use]
    pub const fn kind(&self) -> TaskEventKind {
        match self {
            Self::Created(_) => TaskEventKind::Created,
            Self::Updated(_) => TaskEventKind::Updated,
            Self::StatusChanged(_) => TaskEventKind::StatusChanged,
            Self::Deleted(_) => TaskEventKind::Deleted,
        }
    }

    /// Returns the identifier of the affected task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        match self {
            Self::Created(task) | Self::Updated(task) | Self::StatusChanged(task) => task.id(),
            Self::Deleted(id) => *id,
        }
    }
}

/// Kind of a [`TaskEvent`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskEventKind {
    /// See [`TaskEvent::Created`].
    Created,
    /// See [`TaskEvent::Updated`].
    Updated,
    /// See [`TaskEvent::StatusChanged`].
    StatusChanged,
    /// See [`TaskEvent::Deleted`].
    Deleted,
}

impl TaskEventKind {
    /// Returns the event name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::StatusChanged => "status_changed",
            Self::Deleted => "deleted",
        }
    }
}

impl fmt::Display for TaskEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
