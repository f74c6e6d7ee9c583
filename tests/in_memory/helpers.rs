//! Shared fixtures for in-memory tracker integration tests.

use chrono::{Days, NaiveDate};
use mockable::DefaultClock;
use rstest::fixture;
use worktrack::{
    adapters::memory::InMemoryStore,
    calendar,
    project::domain::Project,
    task::{domain::Priority, services::CreateTaskRequest},
    tracker::Tracker,
    user::domain::User,
};

/// Tracker type used by every in-memory test.
pub type MemoryTracker = Tracker<InMemoryStore, DefaultClock>;

/// Provides an empty tracker for each test.
#[fixture]
pub fn tracker() -> MemoryTracker {
    Tracker::in_memory()
}

/// Returns today's date as the tracker sees it.
#[must_use]
pub fn today() -> NaiveDate {
    calendar::today(&DefaultClock)
}

/// Returns the date `days` away from today; negative values go back.
///
/// # Errors
///
/// Returns an error if the date cannot be represented.
pub fn offset(days: i64) -> Result<NaiveDate, eyre::Report> {
    let magnitude = Days::new(days.unsigned_abs());
    let date = if days < 0 {
        today().checked_sub_days(magnitude)
    } else {
        today().checked_add_days(magnitude)
    };
    date.ok_or_else(|| eyre::eyre!("date {days} days from today is out of range"))
}

/// Registers `username` and gives it a project called `project_name`.
///
/// # Errors
///
/// Returns an error if either creation fails.
pub async fn seed_owner(
    tracker: &MemoryTracker,
    username: &str,
    project_name: &str,
) -> Result<(User, Project), eyre::Report> {
    let user = tracker
        .users()
        .create_user(username, format!("{username}@example.com"))
        .await?;
    let project = tracker
        .projects()
        .create_project(user.id().value(), project_name, None)
        .await?;
    Ok((user, project))
}

/// Builds a medium-priority task request in `project`.
#[must_use]
pub fn task_request(project: &Project, title: &str) -> CreateTaskRequest {
    CreateTaskRequest::new(project.id().value(), title).with_priority(Priority::Medium)
}
