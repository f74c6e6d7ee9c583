//! Task aggregate root and its unsaved draft.

use super::{Priority, StatusTransition, TaskDescription, TaskId, TaskStatus, TaskTitle};
use crate::project::domain::ProjectId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A task that has not been stored yet.
///
/// Drafts always start in [`TaskStatus::Todo`] with no completion date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    project_id: ProjectId,
    title: TaskTitle,
    description: Option<TaskDescription>,
    priority: Priority,
    deadline: Option<NaiveDate>,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates a draft in `project_id`, stamped with the clock time.
    ///
    /// The deadline is taken as given; checking it against the current
    /// date is the caller's concern.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        title: TaskTitle,
        description: Option<TaskDescription>,
        priority: Priority,
        deadline: Option<NaiveDate>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            project_id,
            title,
            description,
            priority,
            deadline,
            created_at: clock.utc(),
        }
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&TaskDescription> {
        self.description.as_ref()
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Turns the draft into a stored task with the assigned identity.
    #[must_use]
    pub fn with_id(&self, id: TaskId) -> Task {
        Task {
            id,
            project_id: self.project_id,
            title: self.title.clone(),
            description: self.description.clone(),
            status: TaskStatus::Todo,
            priority: self.priority,
            deadline: self.deadline,
            completed_at: None,
            created_at: self.created_at,
        }
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: TaskTitle,
    description: Option<TaskDescription>,
    status: TaskStatus,
    priority: Priority,
    deadline: Option<NaiveDate>,
    completed_at: Option<NaiveDate>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted identifier.
    pub id: TaskId,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<TaskDescription>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted deadline, if any.
    pub deadline: Option<NaiveDate>,
    /// Persisted completion date, if any.
    pub completed_at: Option<NaiveDate>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            deadline: data.deadline,
            completed_at: data.completed_at,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&TaskDescription> {
        self.description.as_ref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }

    /// Returns the date the task was completed, if it is done.
    #[must_use]
    pub const fn completed_at(&self) -> Option<NaiveDate> {
        self.completed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns whether the task is done.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.status.is_done()
    }

    /// Returns whether the task has a deadline before `today` and is not
    /// done.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_done() && self.deadline.is_some_and(|deadline| deadline < today)
    }

    /// Returns whether the task has a deadline on or before `date` and is
    /// not done.
    #[must_use]
    pub fn is_due_by(&self, date: NaiveDate) -> bool {
        !self.is_done() && self.deadline.is_some_and(|deadline| deadline <= date)
    }

    /// Replaces the title and description.
    ///
    /// Passing `None` clears the description.
    pub fn update_details(&mut self, title: TaskTitle, description: Option<TaskDescription>) {
        self.title = title;
        self.description = description;
    }

    /// Replaces the priority.
    pub const fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    /// Replaces or clears the deadline.
    pub const fn reschedule(&mut self, deadline: Option<NaiveDate>) {
        self.deadline = deadline;
    }

    /// Moves the task to `target` and applies the completion-date rule.
    ///
    /// Entering [`TaskStatus::Done`] records `today` unless a completion
    /// date is already set; any other status clears it.
    pub fn change_status(&mut self, target: TaskStatus, today: NaiveDate) -> StatusTransition {
        let from = self.status;
        self.status = target;
        self.completed_at = target.completion_date(self.completed_at, today);
        StatusTransition {
            from,
            to: target,
            completed_at: self.completed_at,
        }
    }
}
