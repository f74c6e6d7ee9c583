//! Description of a cascading removal.

use crate::{project::domain::ProjectId, task::domain::TaskId, user::domain::UserId};
use std::fmt;

/// Entity whose removal starts a cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CascadeRoot {
    /// A user and every project and task it owns.
    User(UserId),
    /// A project and every task in it.
    Project(ProjectId),
}

impl fmt::Display for CascadeRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(id) => write!(f, "user {id}"),
            Self::Project(id) => write!(f, "project {id}"),
        }
    }
}

/// The subtree to remove, children listed before their parents.
///
/// The plan is a snapshot. Stores executing it also remove children of
/// the listed parents that appeared after the snapshot was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadePlan {
    root: CascadeRoot,
    project_ids: Vec<ProjectId>,
    task_ids: Vec<TaskId>,
}

impl CascadePlan {
    /// Plans the removal of a user with its projects and their tasks.
    #[must_use]
    pub const fn for_user(
        user_id: UserId,
        project_ids: Vec<ProjectId>,
        task_ids: Vec<TaskId>,
    ) -> Self {
        Self {
            root: CascadeRoot::User(user_id),
            project_ids,
            task_ids,
        }
    }

    /// Plans the removal of a project with its tasks.
    #[must_use]
    pub fn for_project(project_id: ProjectId, task_ids: Vec<TaskId>) -> Self {
        Self {
            root: CascadeRoot::Project(project_id),
            project_ids: vec![project_id],
            task_ids,
        }
    }

    /// Returns the entity whose removal starts the cascade.
    #[must_use]
    pub const fn root(&self) -> CascadeRoot {
        self.root
    }

    /// Returns every project to remove, including a project root.
    #[must_use]
    pub fn project_ids(&self) -> &[ProjectId] {
        &self.project_ids
    }

    /// Returns every task known to be under the root when planning.
    #[must_use]
    pub fn task_ids(&self) -> &[TaskId] {
        &self.task_ids
    }
}

/// What a store actually removed while executing a plan.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CascadeOutcome {
    /// Whether the root itself was removed.
    pub root_removed: bool,
    /// Projects removed, including a project root.
    pub projects_removed: u64,
    /// Tasks removed, in ascending id order, including tasks created after
    /// the plan was taken.
    pub removed_task_ids: Vec<TaskId>,
}

impl CascadeOutcome {
    /// Returns the number of tasks removed.
    #[must_use]
    pub fn tasks_removed(&self) -> u64 {
        u64::try_from(self.removed_task_ids.len()).unwrap_or(u64::MAX)
    }
}
