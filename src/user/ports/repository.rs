//! Repository port for user persistence and lookup.

use crate::user::domain::{NewUser, User, UserId, Username};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// User persistence contract.
///
/// Removal is not part of this port: users are only deleted together
/// with everything they own, through
/// [`crate::hierarchy::ports::HierarchyRepository`].
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user and assigns its identity.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateUsername`] when the username
    /// is already taken.
    async fn save(&self, user: &NewUser) -> UserRepositoryResult<User>;

    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>>;

    /// Finds a user by exact username.
    ///
    /// Returns `None` when no user has the given name.
    async fn find_by_username(&self, username: &str) -> UserRepositoryResult<Option<User>>;

    /// Returns all users, newest first.
    async fn find_all(&self) -> UserRepositoryResult<Vec<User>>;

    /// Returns the number of stored users.
    async fn count(&self) -> UserRepositoryResult<u64>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// The username is already registered.
    #[error("duplicate username: {0}")]
    DuplicateUsername(Username),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
