//! Project aggregate and its unsaved draft.

use super::{ProjectDescription, ProjectId, ProjectName};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A project that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    owner_id: UserId,
    name: ProjectName,
    description: Option<ProjectDescription>,
    created_at: DateTime<Utc>,
}

impl NewProject {
    /// Creates a draft owned by `owner_id`, stamped with the clock time.
    #[must_use]
    pub fn new(
        owner_id: UserId,
        name: ProjectName,
        description: Option<ProjectDescription>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            owner_id,
            name,
            description,
            created_at: clock.utc(),
        }
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&ProjectDescription> {
        self.description.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Turns the draft into a stored project with the assigned identity.
    #[must_use]
    pub fn with_id(&self, id: ProjectId) -> Project {
        Project {
            id,
            owner_id: self.owner_id,
            name: self.name.clone(),
            description: self.description.clone(),
            created_at: self.created_at,
        }
    }
}

/// Project aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    owner_id: UserId,
    name: ProjectName,
    description: Option<ProjectDescription>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted identifier.
    pub id: ProjectId,
    /// Persisted owner reference.
    pub owner_id: UserId,
    /// Persisted name.
    pub name: ProjectName,
    /// Persisted description, if any.
    pub description: Option<ProjectDescription>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            owner_id: data.owner_id,
            name: data.name,
            description: data.description,
            created_at: data.created_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&ProjectDescription> {
        self.description.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replaces the name and description.
    ///
    /// Passing `None` clears the description.
    pub fn update_details(&mut self, name: ProjectName, description: Option<ProjectDescription>) {
        self.name = name;
        self.description = description;
    }
}
