//! Service layer for project creation, editing and lookup.

use crate::{
    project::{
        domain::{NewProject, Project, ProjectDescription, ProjectId, ProjectName},
        ports::{ProjectRepository, ProjectRepositoryError},
    },
    user::domain::UserId,
    validation::ValidationError,
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// No project exists with the requested identifier.
    #[error("project not found: {0}")]
    NotFound(ProjectId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
}

/// Result type for project service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// Project orchestration service.
#[derive(Clone)]
pub struct ProjectService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ProjectService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a project owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Validation`] for malformed input and
    /// [`ProjectServiceError::Repository`] when the owner does not exist or
    /// storage fails.
    pub async fn create_project(
        &self,
        user_id: i64,
        name_text: impl Into<String>,
        description_text: Option<String>,
    ) -> ProjectServiceResult<Project> {
        let owner_id = UserId::new(user_id)?;
        let name = ProjectName::new(name_text)?;
        let description = ProjectDescription::optional(description_text)?;

        let draft = NewProject::new(owner_id, name, description, &*self.clock);
        let project = self.repository.save(&draft).await?;
        tracing::info!(
            project_id = %project.id(),
            owner_id = %project.owner_id(),
            "project created"
        );
        Ok(project)
    }

    /// Replaces a project's name and description.
    ///
    /// Input is validated before the project is looked up. Returns
    /// `Ok(None)` when the project does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Validation`] for malformed input and
    /// [`ProjectServiceError::Repository`] when storage fails.
    pub async fn update_project(
        &self,
        project_id: i64,
        name_text: impl Into<String>,
        description_text: Option<String>,
    ) -> ProjectServiceResult<Option<Project>> {
        let name = ProjectName::new(name_text)?;
        let description = ProjectDescription::optional(description_text)?;
        let id = ProjectId::new(project_id)?;

        let Some(mut project) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };
        project.update_details(name, description);
        self.repository.update(&project).await?;
        tracing::debug!(project_id = %id, "project updated");
        Ok(Some(project))
    }

    /// Finds a project by raw identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Validation`] for a non-positive id
    /// and [`ProjectServiceError::Repository`] when lookup fails.
    pub async fn find_project_by_id(&self, project_id: i64) -> ProjectServiceResult<Option<Project>> {
        let id = ProjectId::new(project_id)?;
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Returns the project with the given identifier, which must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`] when the project is
    /// absent, in addition to the errors of [`Self::find_project_by_id`].
    pub async fn get_project(&self, project_id: i64) -> ProjectServiceResult<Project> {
        let id = ProjectId::new(project_id)?;
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProjectServiceError::NotFound(id))
    }

    /// Returns the projects owned by a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Validation`] for a non-positive id
    /// and [`ProjectServiceError::Repository`] when lookup fails.
    pub async fn find_projects_by_user(&self, user_id: i64) -> ProjectServiceResult<Vec<Project>> {
        let owner_id = UserId::new(user_id)?;
        Ok(self.repository.find_by_owner(owner_id).await?)
    }

    /// Returns all projects, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when lookup fails.
    pub async fn list_projects(&self) -> ProjectServiceResult<Vec<Project>> {
        Ok(self.repository.find_all().await?)
    }

    /// Returns the number of projects owned by a user.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Validation`] for a non-positive id
    /// and [`ProjectServiceError::Repository`] when counting fails.
    pub async fn count_projects_by_user(&self, user_id: i64) -> ProjectServiceResult<u64> {
        let owner_id = UserId::new(user_id)?;
        Ok(self.repository.count_by_owner(owner_id).await?)
    }

    /// Returns whether a user owns at least one project.
    ///
    /// # Errors
    ///
    /// Same as [`Self::count_projects_by_user`].
    pub async fn user_has_projects(&self, user_id: i64) -> ProjectServiceResult<bool> {
        Ok(self.count_projects_by_user(user_id).await? > 0)
    }
}
