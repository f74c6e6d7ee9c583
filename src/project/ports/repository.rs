//! Repository port for project persistence and lookup.

use crate::{
    project::domain::{NewProject, Project, ProjectId},
    user::domain::UserId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project and assigns its identity.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::OwnerNotFound`] when the owning
    /// user does not exist.
    async fn save(&self, project: &NewProject) -> ProjectRepositoryResult<Project>;

    /// Persists a changed name or description.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does
    /// not exist.
    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Finds a project by identifier.
    ///
    /// Returns `None` when the project does not exist.
    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>>;

    /// Returns the projects owned by a user, newest first.
    async fn find_by_owner(&self, owner_id: UserId) -> ProjectRepositoryResult<Vec<Project>>;

    /// Returns all projects, newest first.
    async fn find_all(&self) -> ProjectRepositoryResult<Vec<Project>>;

    /// Returns the number of projects owned by a user.
    async fn count_by_owner(&self, owner_id: UserId) -> ProjectRepositoryResult<u64>;
}

/// Errors returned by project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// The referenced owner does not exist.
    #[error("owner not found: {0}")]
    OwnerNotFound(UserId),

    /// The project was not found.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
