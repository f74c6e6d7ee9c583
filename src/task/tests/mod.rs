//! Unit tests for the task context.


use crate::adapters::memory::InMemoryStore;
use crate::calendar;
use crate::project::{
    domain::{NewProject, Project, ProjectName},
    ports::ProjectRepository,
};
use crate::task::{
    domain::{NewTask, Priority, Task, TaskTitle},
    ports::TaskRepository,
};
use crate::user::{
    domain::{EmailAddress, NewUser, Username},
    ports::UserRepository,
};
use chrono::{Days, NaiveDate};
use mockable::DefaultClock;

fn today() -> NaiveDate {
    calendar::today(&DefaultClock)
}

fn days_ago(days: u64) -> NaiveDate {
    today()
        .checked_sub_days(Days::new(days))
        .expect("date should be representable")
}

fn days_ahead(days: u64) -> NaiveDate {
    today()
        .checked_add_days(Days::new(days))
        .expect("date should be representable")
}

/// Stores a user and one project owned by it.
async fn seed_project(store: &InMemoryStore, username: &str) -> Project {
    let user = UserRepository::save(
        store,
        &NewUser::new(
            Username::new(username).expect("valid username"),
            EmailAddress::new(format!("{username}@example.com")).expect("valid email"),
            &DefaultClock,
        ),
    )
    .await
    .expect("user should be stored");
    ProjectRepository::save(
        store,
        &NewProject::new(
            user.id(),
            ProjectName::new("Launch").expect("valid name"),
            None,
            &DefaultClock,
        ),
    )
    .await
    .expect("project should be stored")
}

/// Stores a task directly, bypassing the service's deadline check.
async fn seed_task(
    store: &InMemoryStore,
    project: &Project,
    title: &str,
    deadline: Option<NaiveDate>,
) -> Task {
    let draft = NewTask::new(
        project.id(),
        TaskTitle::new(title).expect("valid title"),
        None,
        Priority::Medium,
        deadline,
        &DefaultClock,
    );
    TaskRepository::save(store, &draft)
        .await
        .expect("task should be stored")
}
