//! Diesel row models and their conversion to domain entities.

use super::schema::{projects, tasks, users};
use crate::{
    project::domain::{
        NewProject, PersistedProjectData, Project, ProjectDescription, ProjectId, ProjectName,
    },
    task::domain::{
        NewTask, PersistedTaskData, Priority, Task, TaskDescription, TaskId, TaskStatus, TaskTitle,
    },
    user::domain::{EmailAddress, NewUser, PersistedUserData, User, UserId, Username},
    validation::ValidationError,
};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for users.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    /// Rebuilds the domain user, revalidating stored values.
    pub fn into_domain(self) -> Result<User, ValidationError> {
        Ok(User::from_persisted(PersistedUserData {
            id: UserId::new(self.id)?,
            username: Username::new(self.username)?,
            email: EmailAddress::new(self.email)?,
            created_at: self.created_at,
        }))
    }
}

/// Insert model for users.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&NewUser> for NewUserRow {
    fn from(user: &NewUser) -> Self {
        Self {
            username: user.username().as_str().to_owned(),
            email: user.email().as_str().to_owned(),
            created_at: user.created_at(),
        }
    }
}

/// Query result row for projects.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ProjectRow {
    /// Rebuilds the domain project, revalidating stored values.
    pub fn into_domain(self) -> Result<Project, ValidationError> {
        Ok(Project::from_persisted(PersistedProjectData {
            id: ProjectId::new(self.id)?,
            owner_id: UserId::new(self.user_id)?,
            name: ProjectName::new(self.name)?,
            description: ProjectDescription::optional(self.description)?,
            created_at: self.created_at,
        }))
    }
}

/// Insert model for projects.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub struct NewProjectRow {
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&NewProject> for NewProjectRow {
    fn from(project: &NewProject) -> Self {
        Self {
            user_id: project.owner_id().value(),
            name: project.name().as_str().to_owned(),
            description: project.description().map(|text| text.as_str().to_owned()),
            created_at: project.created_at(),
        }
    }
}

/// Mutable project columns. `None` clears the description.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = projects)]
#[diesel(treat_none_as_null = true)]
pub struct ProjectChangeset {
    pub name: String,
    pub description: Option<String>,
}

impl From<&Project> for ProjectChangeset {
    fn from(project: &Project) -> Self {
        Self {
            name: project.name().as_str().to_owned(),
            description: project.description().map(|text| text.as_str().to_owned()),
        }
    }
}

/// Query result row for tasks.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub deadline: Option<NaiveDate>,
    pub completed_at: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl TaskRow {
    /// Rebuilds the domain task, revalidating stored values.
    ///
    /// The deadline is not checked against the current date: stored
    /// tasks may legitimately be overdue.
    pub fn into_domain(self) -> Result<Task, ValidationError> {
        Ok(Task::from_persisted(PersistedTaskData {
            id: TaskId::new(self.id)?,
            project_id: ProjectId::new(self.project_id)?,
            title: TaskTitle::new(self.title)?,
            description: TaskDescription::optional(self.description)?,
            status: TaskStatus::try_from(self.status.as_str())?,
            priority: Priority::try_from(self.priority.as_str())?,
            deadline: self.deadline,
            completed_at: self.completed_at,
            created_at: self.created_at,
        }))
    }
}

/// Insert model for tasks.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    pub project_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub deadline: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<&NewTask> for NewTaskRow {
    fn from(task: &NewTask) -> Self {
        Self {
            project_id: task.project_id().value(),
            title: task.title().as_str().to_owned(),
            description: task.description().map(|text| text.as_str().to_owned()),
            status: TaskStatus::Todo.as_str().to_owned(),
            priority: task.priority().as_str().to_owned(),
            deadline: task.deadline(),
            created_at: task.created_at(),
        }
    }
}

/// Mutable task columns. `None` clears the column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub deadline: Option<NaiveDate>,
    pub completed_at: Option<NaiveDate>,
}

impl From<&Task> for TaskChangeset {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title().as_str().to_owned(),
            description: task.description().map(|text| text.as_str().to_owned()),
            status: task.status().as_str().to_owned(),
            priority: task.priority().as_str().to_owned(),
            deadline: task.deadline(),
            completed_at: task.completed_at(),
        }
    }
}
