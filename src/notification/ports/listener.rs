//! Listener port invoked for each task event.

use crate::task::domain::{Task, TaskId};
use thiserror::Error;

/// Result type returned by listener callbacks.
pub type ListenerResult = Result<(), ListenerError>;

/// Consumer of task lifecycle events.
///
/// Callbacks run synchronously on the caller's thread after the mutation
/// has been stored. A slow listener delays the caller.
#[cfg_attr(test, mockall::automock)]
pub trait TaskListener: Send + Sync {
    /// Called after a task is created.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError`] when the listener cannot handle the event.
    fn on_task_created(&self, task: &Task) -> ListenerResult;

    /// Called after a task's details, priority or deadline change.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError`] when the listener cannot handle the event.
    fn on_task_updated(&self, task: &Task) -> ListenerResult;

    /// Called after a task's status is set.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError`] when the listener cannot handle the event.
    fn on_task_status_changed(&self, task: &Task) -> ListenerResult;

    /// Called after a task is deleted.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError`] when the listener cannot handle the event.
    fn on_task_deleted(&self, task_id: TaskId) -> ListenerResult;
}

/// Failure reported by a listener.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("listener failed: {message}")]
pub struct ListenerError {
    message: String,
}

impl ListenerError {
    /// Creates a listener error with a human-readable reason.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the reason.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
