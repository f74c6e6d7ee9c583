//! Service layer for deleting users and projects with their dependents.

use crate::{
    hierarchy::{
        domain::{CascadeOutcome, CascadePlan},
        ports::{HierarchyRepository, HierarchyRepositoryError},
    },
    notification::{domain::TaskEvent, services::NotificationHub},
    project::{
        domain::ProjectId,
        ports::{ProjectRepository, ProjectRepositoryError},
    },
    task::{
        domain::TaskId,
        ports::{TaskRepository, TaskRepositoryError},
    },
    user::{
        domain::UserId,
        ports::{UserRepository, UserRepositoryError},
    },
    validation::ValidationError,
};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for cascading deletion.
#[derive(Debug, Error)]
pub enum CascadeError {
    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// User lookup failed.
    #[error(transparent)]
    User(#[from] UserRepositoryError),
    /// Project lookup failed.
    #[error(transparent)]
    Project(#[from] ProjectRepositoryError),
    /// Task lookup failed.
    #[error(transparent)]
    Task(#[from] TaskRepositoryError),
    /// Executing the removal failed.
    #[error(transparent)]
    Hierarchy(#[from] HierarchyRepositoryError),
}

/// Result type for cascade service operations.
pub type CascadeResult<T> = Result<T, CascadeError>;

/// Deletes users and projects together with everything they own.
///
/// Every task the store reports as removed is published to the hub as a
/// [`TaskEvent::Deleted`] after the removal has committed.
#[derive(Clone)]
pub struct CascadeService<S>
where
    S: UserRepository + ProjectRepository + TaskRepository + HierarchyRepository,
{
    store: Arc<S>,
    hub: Arc<NotificationHub>,
}

impl<S> CascadeService<S>
where
    S: UserRepository + ProjectRepository + TaskRepository + HierarchyRepository,
{
    /// Creates a cascade service over `store` publishing to `hub`.
    #[must_use]
    pub const fn new(store: Arc<S>, hub: Arc<NotificationHub>) -> Self {
        Self { store, hub }
    }

    /// Deletes a user, its projects and their tasks.
    ///
    /// Returns `Ok(false)` when the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::Validation`] for a non-positive id and a
    /// repository variant when lookup or removal fails.
    pub async fn delete_user(&self, user_id: i64) -> CascadeResult<bool> {
        let id = UserId::new(user_id)?;
        if UserRepository::find_by_id(&*self.store, id).await?.is_none() {
            return Ok(false);
        }

        let projects = self.store.find_by_owner(id).await?;
        let project_ids: Vec<ProjectId> = projects.iter().map(|project| project.id()).collect();
        let task_ids = self.task_ids_of(&project_ids).await?;

        let plan = CascadePlan::for_user(id, project_ids, task_ids);
        let outcome = self.store.execute(&plan).await?;
        Ok(self.finish(&plan, &outcome))
    }

    /// Deletes a project and its tasks.
    ///
    /// Returns `Ok(false)` when the project does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::Validation`] for a non-positive id and a
    /// repository variant when lookup or removal fails.
    pub async fn delete_project(&self, project_id: i64) -> CascadeResult<bool> {
        let id = ProjectId::new(project_id)?;
        if ProjectRepository::find_by_id(&*self.store, id).await?.is_none() {
            return Ok(false);
        }

        let task_ids = self.task_ids_of(&[id]).await?;
        let plan = CascadePlan::for_project(id, task_ids);
        let outcome = self.store.execute(&plan).await?;
        Ok(self.finish(&plan, &outcome))
    }

    async fn task_ids_of(&self, project_ids: &[ProjectId]) -> CascadeResult<Vec<TaskId>> {
        let mut task_ids = Vec::new();
        for project_id in project_ids {
            let tasks = self.store.find_by_project(*project_id).await?;
            task_ids.extend(tasks.iter().map(|task| task.id()));
        }
        Ok(task_ids)
    }

    fn finish(&self, plan: &CascadePlan, outcome: &CascadeOutcome) -> bool {
        if !outcome.root_removed {
            tracing::info!(root = %plan.root(), "cascade root vanished before removal");
            return false;
        }
        tracing::info!(
            root = %plan.root(),
            projects_removed = outcome.projects_removed,
            tasks_removed = outcome.tasks_removed(),
            "cascade delete completed"
        );
        for task_id in &outcome.removed_task_ids {
            let report = self.hub.publish(&TaskEvent::Deleted(*task_id));
            if !report.is_clean() {
                tracing::debug!(
                    task_id = %task_id,
                    failed = report.failures().len(),
                    "cascaded task deletion partially delivered"
                );
            }
        }
        true
    }
}
