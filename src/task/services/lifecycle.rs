//! Service layer for task creation, mutation and deletion.

use super::{TaskServiceError, TaskServiceResult};
use crate::{
    calendar,
    notification::{
        domain::TaskEvent,
        ports::TaskListener,
        services::NotificationHub,
    },
    project::domain::ProjectId,
    task::{
        domain::{NewTask, Priority, Task, TaskDescription, TaskId, TaskStatus, TaskTitle},
        ports::TaskRepository,
    },
    validation::{Field, rules},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;

/// Request payload for creating a task.
///
/// Priority has no default and must be supplied before the request is
/// submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: i64,
    title: String,
    description: Option<String>,
    priority: Option<Priority>,
    deadline: Option<NaiveDate>,
}

impl CreateTaskRequest {
    /// Creates a request with the required project and title.
    #[must_use]
    pub fn new(project_id: i64, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: None,
            priority: None,
            deadline: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Task mutation service.
///
/// Every successful mutation is published to the shared
/// [`NotificationHub`] after it has been stored. Failed mutations publish
/// nothing.
#[derive(Clone)]
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    hub: Arc<NotificationHub>,
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service publishing to `hub`.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>, hub: Arc<NotificationHub>) -> Self {
        Self {
            repository,
            clock,
            hub,
        }
    }

    /// Returns the hub this service publishes to.
    #[must_use]
    pub const fn hub(&self) -> &Arc<NotificationHub> {
        &self.hub
    }

    /// Registers a listener for task events.
    pub fn subscribe(&self, listener: Arc<dyn TaskListener>) {
        self.hub.subscribe(listener);
    }

    /// Removes the first registration of `listener`.
    ///
    /// Returns `false` when it was not subscribed.
    #[must_use]
    pub fn unsubscribe(&self, listener: &Arc<dyn TaskListener>) -> bool {
        self.hub.unsubscribe(listener)
    }

    /// Creates a task in `TODO` status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for malformed input, a
    /// missing priority or a deadline before today, and
    /// [`TaskServiceError::Repository`] when the project does not exist or
    /// storage fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let project_id = ProjectId::new(request.project_id)?;
        let title = TaskTitle::new(request.title)?;
        let description = TaskDescription::optional(request.description)?;
        let priority = rules::validate_required(Field::Priority, request.priority)?;
        rules::validate_deadline(request.deadline, calendar::today(&*self.clock))?;

        let draft = NewTask::new(
            project_id,
            title,
            description,
            priority,
            request.deadline,
            &*self.clock,
        );
        let task = self.repository.save(&draft).await?;
        tracing::info!(
            task_id = %task.id(),
            project_id = %task.project_id(),
            priority = %task.priority(),
            "task created"
        );
        self.notify(&TaskEvent::Created(task.clone()));
        Ok(task)
    }

    /// Sets a task's status and applies the completion-date rule.
    ///
    /// Setting the current status again is still stored and published.
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for a non-positive id and
    /// [`TaskServiceError::Repository`] when storage fails.
    pub async fn update_status(
        &self,
        task_id: i64,
        status: TaskStatus,
    ) -> TaskServiceResult<Option<Task>> {
        let id = TaskId::new(task_id)?;
        let Some(mut task) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };
        let transition = task.change_status(status, calendar::today(&*self.clock));
        self.repository.update(&task).await?;
        tracing::debug!(
            task_id = %id,
            from = %transition.from,
            to = %transition.to,
            completed_at = ?transition.completed_at,
            "task status changed"
        );
        self.notify(&TaskEvent::StatusChanged(task.clone()));
        Ok(Some(task))
    }

    /// Sets a task's priority.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for a non-positive id and
    /// [`TaskServiceError::Repository`] when storage fails.
    pub async fn update_priority(
        &self,
        task_id: i64,
        priority: Priority,
    ) -> TaskServiceResult<Option<Task>> {
        let id = TaskId::new(task_id)?;
        self.modify(id, |task| task.set_priority(priority)).await
    }

    /// Replaces a task's title and description.
    ///
    /// Passing `None` clears the description. Input is validated before
    /// the task is looked up. Returns `Ok(None)` when the task does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for malformed input and
    /// [`TaskServiceError::Repository`] when storage fails.
    pub async fn update_details(
        &self,
        task_id: i64,
        title_text: impl Into<String>,
        description_text: Option<String>,
    ) -> TaskServiceResult<Option<Task>> {
        let title = TaskTitle::new(title_text)?;
        let description = TaskDescription::optional(description_text)?;
        let id = TaskId::new(task_id)?;
        self.modify(id, move |task| task.update_details(title, description))
            .await
    }

    /// Sets or clears a task's deadline.
    ///
    /// A new deadline must not be before today. Returns `Ok(None)` when
    /// the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for a non-positive id or a
    /// past deadline, and [`TaskServiceError::Repository`] when storage
    /// fails.
    pub async fn update_deadline(
        &self,
        task_id: i64,
        deadline: Option<NaiveDate>,
    ) -> TaskServiceResult<Option<Task>> {
        rules::validate_deadline(deadline, calendar::today(&*self.clock))?;
        let id = TaskId::new(task_id)?;
        self.modify(id, |task| task.reschedule(deadline)).await
    }

    /// Deletes a task.
    ///
    /// Returns `Ok(false)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for a non-positive id and
    /// [`TaskServiceError::Repository`] when storage fails.
    pub async fn delete_task(&self, task_id: i64) -> TaskServiceResult<bool> {
        let id = TaskId::new(task_id)?;
        if self.repository.find_by_id(id).await?.is_none() {
            return Ok(false);
        }
        if !self.repository.delete(id).await? {
            return Ok(false);
        }
        tracing::info!(task_id = %id, "task deleted");
        self.notify(&TaskEvent::Deleted(id));
        Ok(true)
    }

    /// Finds a task by raw identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for a non-positive id and
    /// [`TaskServiceError::Repository`] when lookup fails.
    pub async fn find_task_by_id(&self, task_id: i64) -> TaskServiceResult<Option<Task>> {
        let id = TaskId::new(task_id)?;
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Returns the task with the given identifier, which must exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task is absent, in
    /// addition to the errors of [`Self::find_task_by_id`].
    pub async fn get_task(&self, task_id: i64) -> TaskServiceResult<Task> {
        let id = TaskId::new(task_id)?;
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))
    }

    async fn modify<F>(&self, id: TaskId, mutate: F) -> TaskServiceResult<Option<Task>>
    where
        F: FnOnce(&mut Task) + Send,
    {
        let Some(mut task) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };
        mutate(&mut task);
        self.repository.update(&task).await?;
        tracing::debug!(task_id = %id, "task updated");
        self.notify(&TaskEvent::Updated(task.clone()));
        Ok(Some(task))
    }

    fn notify(&self, event: &TaskEvent) {
        let report = self.hub.publish(event);
        if !report.is_clean() {
            tracing::debug!(
                event = %report.event(),
                task_id = %event.task_id(),
                delivered = report.delivered(),
                failed = report.failures().len(),
                "task event partially delivered"
            );
        }
    }
}
