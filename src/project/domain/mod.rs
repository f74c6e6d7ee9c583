//! Domain model for projects.

mod ids;
mod project;
mod values;

pub use ids::ProjectId;
pub use project::{NewProject, PersistedProjectData, Project};
pub use values::{ProjectDescription, ProjectName};
