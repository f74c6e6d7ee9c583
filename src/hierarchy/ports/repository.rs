//! Repository port executing cascade plans.

use crate::hierarchy::domain::{CascadeOutcome, CascadePlan};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for hierarchy repository operations.
pub type HierarchyRepositoryResult<T> = Result<T, HierarchyRepositoryError>;

/// Atomic removal of an ownership subtree.
#[async_trait]
pub trait HierarchyRepository: Send + Sync {
    /// Removes the plan's tasks, then its projects, then its root, as one
    /// unit.
    ///
    /// Children of a listed parent are removed even if they are missing
    /// from the plan. Either the whole subtree is removed or nothing is.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyRepositoryError::Persistence`] when the store
    /// fails; nothing is removed in that case.
    async fn execute(&self, plan: &CascadePlan) -> HierarchyRepositoryResult<CascadeOutcome>;
}

/// Errors returned by hierarchy repository implementations.
#[derive(Debug, Clone, Error)]
pub enum HierarchyRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl HierarchyRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
