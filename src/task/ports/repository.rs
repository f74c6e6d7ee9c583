//! Repository port for task persistence and lookup.

use crate::{
    project::domain::ProjectId,
    task::domain::{NewTask, Priority, Task, TaskId, TaskStatus},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// List lookups return tasks newest first unless stated otherwise.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task and assigns its identity.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::ProjectNotFound`] when the owning
    /// project does not exist.
    async fn save(&self, task: &NewTask) -> TaskRepositoryResult<Task>;

    /// Persists every mutable field of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Removes a task.
    ///
    /// Returns `false` when there was nothing to remove.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;

    /// Finds a task by identifier.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the tasks of a project.
    async fn find_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the tasks in a status.
    async fn find_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the tasks with a priority.
    async fn find_by_priority(&self, priority: Priority) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns all tasks.
    async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns open tasks whose deadline is on or before `date`, earliest
    /// deadline first.
    async fn find_open_due_by(&self, date: NaiveDate) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns open tasks whose deadline is strictly before `today`,
    /// earliest deadline first.
    async fn find_overdue(&self, today: NaiveDate) -> TaskRepositoryResult<Vec<Task>>;

    /// Counts the tasks of a project in a status.
    async fn count_by_project_and_status(
        &self,
        project_id: ProjectId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<u64>;

    /// Counts all tasks of a project.
    async fn count_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<u64>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The referenced project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
