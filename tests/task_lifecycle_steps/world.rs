//! Shared world state for task lifecycle BDD scenarios.

use mockable::DefaultClock;
use rstest::fixture;
use worktrack::{
    adapters::memory::InMemoryStore,
    project::domain::Project,
    task::{domain::Task, services::TaskServiceError},
    tracker::Tracker,
    user::domain::User,
};

/// Tracker type used by the BDD world.
pub type TestTracker = Tracker<InMemoryStore, DefaultClock>;

/// Scenario world for task lifecycle behaviour tests.
pub struct TaskLifecycleWorld {
    pub tracker: TestTracker,
    pub owner: Option<User>,
    pub project: Option<Project>,
    pub task: Option<Task>,
    pub last_create_result: Option<Result<Task, TaskServiceError>>,
}

impl TaskLifecycleWorld {
    /// Creates a world over an empty in-memory tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tracker: Tracker::in_memory(),
            owner: None,
            project: None,
            task: None,
            last_create_result: None,
        }
    }

    /// Returns the project created by a given step.
    ///
    /// # Errors
    ///
    /// Returns an error if no project has been created yet.
    pub fn project(&self) -> Result<&Project, eyre::Report> {
        self.project
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }

    /// Returns the task created by a given step.
    ///
    /// # Errors
    ///
    /// Returns an error if no task has been created yet.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for TaskLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskLifecycleWorld {
    TaskLifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
