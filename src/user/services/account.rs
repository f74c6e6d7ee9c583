//! Service layer for user registration and lookup.

use crate::{
    user::{
        domain::{EmailAddress, NewUser, User, UserId, Username},
        ports::{UserRepository, UserRepositoryError},
    },
    validation::{Field, ValidationError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for user operations.
#[derive(Debug, Error)]
pub enum UserServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// No user exists with the requested identifier.
    #[error("user not found: {0}")]
    NotFound(UserId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

/// Result type for user service operations.
pub type UserServiceResult<T> = Result<T, UserServiceError>;

/// User registration and lookup service.
#[derive(Clone)]
pub struct UserService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> UserService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new user service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Validation`] when the username or email
    /// is malformed or the username is already taken, and
    /// [`UserServiceError::Repository`] when storage fails.
    pub async fn create_user(
        &self,
        raw_username: impl Into<String>,
        raw_email: impl Into<String>,
    ) -> UserServiceResult<User> {
        let username = Username::new(raw_username)?;
        let email = EmailAddress::new(raw_email)?;

        if self
            .repository
            .find_by_username(username.as_str())
            .await?
            .is_some()
        {
            return Err(ValidationError::UsernameTaken(username.as_str().to_owned()).into());
        }

        let draft = NewUser::new(username, email, &*self.clock);
        let user = self.repository.save(&draft).await.map_err(|err| match err {
            UserRepositoryError::DuplicateUsername(name) => {
                UserServiceError::Validation(ValidationError::UsernameTaken(name.as_str().to_owned()))
            }
            other => other.into(),
        })?;
        tracing::info!(user_id = %user.id(), username = %user.username(), "user created");
        Ok(user)
    }

    /// Finds a user by raw identifier.
    ///
    /// Returns `Ok(None)` when no user has the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Validation`] for a non-positive id and
    /// [`UserServiceError::Repository`] when lookup fails.
    pub async fn find_user_by_id(&self, id: i64) -> UserServiceResult<Option<User>> {
        let user_id = UserId::new(id)?;
        Ok(self.repository.find_by_id(user_id).await?)
    }

    /// Returns the user with the given identifier, which must exist.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::NotFound`] when the user is absent, in
    /// addition to the errors of [`Self::find_user_by_id`].
    pub async fn get_user(&self, id: i64) -> UserServiceResult<User> {
        let user_id = UserId::new(id)?;
        self.repository
            .find_by_id(user_id)
            .await?
            .ok_or(UserServiceError::NotFound(user_id))
    }

    /// Finds a user by exact username.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Validation`] when the name is blank and
    /// [`UserServiceError::Repository`] when lookup fails.
    pub async fn find_user_by_username(&self, username: &str) -> UserServiceResult<Option<User>> {
        if username.trim().is_empty() {
            return Err(ValidationError::Blank {
                field: Field::Username,
            }
            .into());
        }
        Ok(self.repository.find_by_username(username).await?)
    }

    /// Returns whether a user with the given name exists.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Repository`] when lookup fails.
    pub async fn username_exists(&self, username: &str) -> UserServiceResult<bool> {
        Ok(self.repository.find_by_username(username).await?.is_some())
    }

    /// Returns all users, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Repository`] when lookup fails.
    pub async fn list_users(&self) -> UserServiceResult<Vec<User>> {
        Ok(self.repository.find_all().await?)
    }

    /// Returns the total number of users.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Repository`] when counting fails.
    pub async fn count_users(&self) -> UserServiceResult<u64> {
        Ok(self.repository.count().await?)
    }
}
