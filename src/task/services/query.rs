//! Read-only task queries and project completion figures.

use super::TaskServiceResult;
use crate::{
    calendar,
    project::domain::ProjectId,
    task::{
        domain::{Priority, ProjectProgress, Task, TaskStatus},
        ports::TaskRepository,
    },
    validation::rules,
};
use chrono::{Days, NaiveDate};
use mockable::Clock;
use std::sync::Arc;

/// Task lookup and aggregation service.
///
/// "Today" is the UTC date read from the injected clock.
#[derive(Clone)]
pub struct TaskQueryService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskQueryService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task query service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns the tasks of a project, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Validation`] for a non-positive
    /// id and [`super::TaskServiceError::Repository`] when lookup fails.
    pub async fn find_by_project(&self, project_id: i64) -> TaskServiceResult<Vec<Task>> {
        let id = ProjectId::new(project_id)?;
        Ok(self.repository.find_by_project(id).await?)
    }

    /// Returns the tasks in `status`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Repository`] when lookup fails.
    pub async fn find_by_status(&self, status: TaskStatus) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.find_by_status(status).await?)
    }

    /// Returns the tasks with `priority`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Repository`] when lookup fails.
    pub async fn find_by_priority(&self, priority: Priority) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.find_by_priority(priority).await?)
    }

    /// Returns every task, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Repository`] when lookup fails.
    pub async fn find_all(&self) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.find_all().await?)
    }

    /// Returns open tasks due on or before `date`, earliest first.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Repository`] when lookup fails.
    pub async fn find_due_by(&self, date: NaiveDate) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.find_open_due_by(date).await?)
    }

    /// Returns open tasks due today or earlier.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Repository`] when lookup fails.
    pub async fn find_due_today(&self) -> TaskServiceResult<Vec<Task>> {
        self.find_due_by(self.today()).await
    }

    /// Returns open tasks due within the next `raw_days` days, including
    /// overdue ones.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Validation`] when `raw_days` is
    /// negative and [`super::TaskServiceError::Repository`] when lookup
    /// fails.
    pub async fn find_due_in_next_days(&self, raw_days: i64) -> TaskServiceResult<Vec<Task>> {
        let days = rules::validate_day_count(raw_days)?;
        let horizon = self
            .today()
            .checked_add_days(Days::new(days))
            .unwrap_or(NaiveDate::MAX);
        self.find_due_by(horizon).await
    }

    /// Returns open tasks whose deadline has passed, earliest first.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Repository`] when lookup fails.
    pub async fn find_overdue(&self) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.find_overdue(self.today()).await?)
    }

    /// Returns the overdue tasks of one project, earliest first.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Validation`] for a non-positive
    /// id and [`super::TaskServiceError::Repository`] when lookup fails.
    pub async fn find_overdue_in_project(&self, project_id: i64) -> TaskServiceResult<Vec<Task>> {
        let id = ProjectId::new(project_id)?;
        let today = self.today();
        let mut overdue: Vec<Task> = self
            .repository
            .find_by_project(id)
            .await?
            .into_iter()
            .filter(|task| task.is_overdue(today))
            .collect();
        overdue.sort_by_key(Task::deadline);
        Ok(overdue)
    }

    /// Counts the tasks of a project in `status`.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Validation`] for a non-positive
    /// id and [`super::TaskServiceError::Repository`] when counting fails.
    pub async fn count_by_project_and_status(
        &self,
        project_id: i64,
        status: TaskStatus,
    ) -> TaskServiceResult<u64> {
        let id = ProjectId::new(project_id)?;
        Ok(self.repository.count_by_project_and_status(id, status).await?)
    }

    /// Returns the done and total task counts of a project.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Validation`] for a non-positive
    /// id and [`super::TaskServiceError::Repository`] when counting fails.
    pub async fn project_progress(&self, project_id: i64) -> TaskServiceResult<ProjectProgress> {
        let id = ProjectId::new(project_id)?;
        let total = self.repository.count_by_project(id).await?;
        let done = self
            .repository
            .count_by_project_and_status(id, TaskStatus::Done)
            .await?;
        Ok(ProjectProgress::new(total, done))
    }

    /// Returns the truncated percentage of done tasks in a project.
    ///
    /// A project without tasks, including one that does not exist, is 0%
    /// complete.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::project_progress`].
    pub async fn calculate_project_completion(&self, project_id: i64) -> TaskServiceResult<u8> {
        Ok(self.project_progress(project_id).await?.percentage())
    }

    /// Returns whether a project has any tasks.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::project_progress`].
    pub async fn project_has_tasks(&self, project_id: i64) -> TaskServiceResult<bool> {
        let id = ProjectId::new(project_id)?;
        Ok(self.repository.count_by_project(id).await? > 0)
    }

    fn today(&self) -> NaiveDate {
        calendar::today(&*self.clock)
    }
}
