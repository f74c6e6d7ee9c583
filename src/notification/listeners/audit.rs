//! Audit trail of task events.

use crate::{
    notification::ports::{ListenerError, ListenerResult, TaskListener},
    task::domain::{Task, TaskId},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Kind of audited action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    /// A task was created.
    Create,
    /// A task was edited.
    Update,
    /// A task was deleted.
    Delete,
    /// A task's status was set.
    StatusChange,
}

impl AuditAction {
    /// Returns the canonical action label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::StatusChange => "STATUS_CHANGE",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded audit line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the event was observed.
    pub recorded_at: DateTime<Utc>,
    /// What happened.
    pub action: AuditAction,
    /// Human-readable description.
    pub message: String,
}

/// Listener that keeps a chronological audit trail and logs each entry.
pub struct AuditTrail<C>
where
    C: Clock + Send + Sync,
{
    clock: Arc<C>,
    entries: Mutex<Vec<AuditEntry>>,
}

impl<C> AuditTrail<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty audit trail stamped by `clock`.
    #[must_use]
    pub const fn new(clock: Arc<C>) -> Self {
        Self {
            clock,
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Returns a copy of every entry recorded so far.
    #[must_use]
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Serializes the trail as newline-delimited JSON.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when an entry cannot be serialized.
    pub fn to_json_lines(&self) -> Result<String, serde_json::Error> {
        let entries = self.entries();
        let mut output = String::new();
        for entry in &entries {
            output.push_str(&serde_json::to_string(entry)?);
            output.push('\n');
        }
        Ok(output)
    }

    fn record(&self, action: AuditAction, message: String) -> ListenerResult {
        let entry = AuditEntry {
            recorded_at: self.clock.utc(),
            action,
            message,
        };
        tracing::info!(
            target: "worktrack::audit",
            action = %entry.action,
            recorded_at = %entry.recorded_at,
            "{}",
            entry.message
        );
        self.entries
            .lock()
            .map_err(|err| ListenerError::new(err.to_string()))?
            .push(entry);
        Ok(())
    }
}

impl<C> fmt::Debug for AuditTrail<C>
where
    C: Clock + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditTrail")
            .field("entries", &self.entries().len())
            .finish_non_exhaustive()
    }
}

impl<C> TaskListener for AuditTrail<C>
where
    C: Clock + Send + Sync,
{
    fn on_task_created(&self, task: &Task) -> ListenerResult {
        self.record(AuditAction::Create, format!("task created: {}", task.title()))
    }

    fn on_task_updated(&self, task: &Task) -> ListenerResult {
        self.record(AuditAction::Update, format!("task updated: {}", task.title()))
    }

    fn on_task_status_changed(&self, task: &Task) -> ListenerResult {
        self.record(
            AuditAction::StatusChange,
            format!("task '{}' -> {}", task.title(), task.status()),
        )
    }

    fn on_task_deleted(&self, task_id: TaskId) -> ListenerResult {
        self.record(AuditAction::Delete, format!("task deleted: id={task_id}"))
    }
}
