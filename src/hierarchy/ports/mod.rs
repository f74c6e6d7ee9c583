//! Port contracts for cascading removal.

pub mod repository;

pub use repository::{HierarchyRepository, HierarchyRepositoryError, HierarchyRepositoryResult};
