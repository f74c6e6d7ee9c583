//! Application services for projects.

mod catalogue;

pub use catalogue::{ProjectService, ProjectServiceError, ProjectServiceResult};
