//! Errors shared by the task services.

use crate::{
    task::{domain::TaskId, ports::TaskRepositoryError},
    validation::ValidationError,
};
use thiserror::Error;

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// No task exists with the requested identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;
