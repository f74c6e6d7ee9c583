//! Integration tests for [`PostgresStore`] against a live database.
//!
//! These tests exercise every repository port and the cascade through the
//! tracker facade. They run only when `WORKTRACK_TEST_DATABASE_URL` names a
//! disposable `PostgreSQL` database; otherwise each test returns early.
//! Every test works under freshly generated usernames so runs can share a
//! database.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::print_stderr,
    reason = "Skip notices are informational"
)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, OnceLock};

use chrono::{Days, NaiveDate};
use diesel::connection::SimpleConnection;
use mockable::DefaultClock;
use rstest::rstest;
use worktrack::{
    adapters::postgres::{PostgresStore, SCHEMA_SQL},
    calendar,
    config::TrackerConfig,
    project::{
        domain::ProjectId,
        ports::ProjectRepositoryError,
        services::ProjectServiceError,
    },
    task::{
        domain::{NewTask, Priority, TaskStatus, TaskTitle},
        ports::TaskRepository,
        services::CreateTaskRequest,
    },
    tracker::{Tracker, TrackerSetupError},
    user::{domain::User, services::UserServiceError},
    validation::ValidationError,
};

/// Environment variable naming the test database.
const TEST_DATABASE_URL_VAR: &str = "WORKTRACK_TEST_DATABASE_URL";

type PgTracker = Tracker<PostgresStore, DefaultClock>;

static SCHEMA_READY: OnceLock<()> = OnceLock::new();
static NAME_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Connects to the test database, or returns `None` when none is configured.
fn pg_tracker() -> Option<PgTracker> {
    let Ok(url) = std::env::var(TEST_DATABASE_URL_VAR) else {
        eprintln!("{TEST_DATABASE_URL_VAR} not set; skipping PostgreSQL test");
        return None;
    };
    let store = PostgresStore::connect(&url, 2).expect("pool should build");
    SCHEMA_READY.get_or_init(|| {
        let mut connection = store.pool().get().expect("connection should be available");
        connection
            .batch_execute(SCHEMA_SQL)
            .expect("schema should apply");
    });
    Some(Tracker::new(Arc::new(store), Arc::new(DefaultClock)))
}

/// Returns a username unlikely to exist from previous runs.
fn unique_username(prefix: &str) -> String {
    let serial = NAME_COUNTER.fetch_add(1, Ordering::Relaxed);
    let stamp = chrono::Utc::now().timestamp_micros();
    format!("{prefix}_{stamp}_{}_{serial}", std::process::id())
}

fn today() -> NaiveDate {
    calendar::today(&DefaultClock)
}

async fn seed_user(tracker: &PgTracker, prefix: &str) -> User {
    let username = unique_username(prefix);
    tracker
        .users()
        .create_user(username.as_str(), format!("{username}@example.com"))
        .await
        .expect("user should be created")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn user_round_trip_and_duplicate_username() {
    let Some(tracker) = tokio::task::block_in_place(pg_tracker) else {
        return;
    };
    let user = seed_user(&tracker, "alice").await;

    let by_name = tracker
        .users()
        .find_user_by_username(user.username().as_str())
        .await
        .expect("lookup should succeed");
    assert_eq!(by_name.as_ref().map(User::id), Some(user.id()));

    let duplicate = tracker
        .users()
        .create_user(user.username().as_str(), "other@example.com")
        .await;
    assert!(matches!(
        duplicate,
        Err(UserServiceError::Validation(ValidationError::UsernameTaken(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "current_thread")]
async fn connect_without_database_url_is_rejected() {
    let result = PgTracker::connect(&TrackerConfig::default()).await;

    assert!(matches!(result, Err(TrackerSetupError::MissingDatabaseUrl)));
}

#[rstest]
#[tokio::test(flavor = "current_thread")]
async fn connect_builds_pool_off_the_runtime_thread() {
    let Ok(url) = std::env::var(TEST_DATABASE_URL_VAR) else {
        eprintln!("{TEST_DATABASE_URL_VAR} not set; skipping PostgreSQL test");
        return;
    };
    let config = TrackerConfig {
        database_url: Some(url),
        ..TrackerConfig::default()
    };

    let tracker = PgTracker::connect(&config)
        .await
        .expect("tracker should connect on a single-threaded runtime");
    let user = seed_user(&tracker, "connect").await;

    let found = tracker
        .users()
        .find_user_by_username(user.username().as_str())
        .await
        .expect("lookup should succeed");
    assert_eq!(found.as_ref().map(User::id), Some(user.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_requires_an_existing_owner() {
    let Some(tracker) = tokio::task::block_in_place(pg_tracker) else {
        return;
    };

    let result = tracker
        .projects()
        .create_project(i64::from(i32::MAX), "Orphan", None)
        .await;

    assert!(matches!(
        result,
        Err(ProjectServiceError::Repository(ProjectRepositoryError::OwnerNotFound(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_status_round_trip_sets_and_clears_completion() {
    let Some(tracker) = tokio::task::block_in_place(pg_tracker) else {
        return;
    };
    let owner = seed_user(&tracker, "status").await;
    let project = tracker
        .projects()
        .create_project(owner.id().value(), "Launch", Some("desc".to_owned()))
        .await
        .expect("project should be created");
    let task = tracker
        .tasks()
        .create_task(
            CreateTaskRequest::new(project.id().value(), "Write spec")
                .with_priority(Priority::High),
        )
        .await
        .expect("task should be created");
    let project_id = project.id().value();

    let done = tracker
        .tasks()
        .update_status(task.id().value(), TaskStatus::Done)
        .await
        .expect("update should succeed")
        .expect("task should exist");
    assert_eq!(done.completed_at(), Some(today()));
    assert_eq!(
        tracker
            .queries()
            .calculate_project_completion(project_id)
            .await
            .expect("completion should compute"),
        100
    );

    let reopened = tracker
        .tasks()
        .update_status(task.id().value(), TaskStatus::InProgress)
        .await
        .expect("update should succeed")
        .expect("task should exist");
    assert_eq!(reopened.completed_at(), None);
    assert_eq!(
        tracker
            .tasks()
            .get_task(task.id().value())
            .await
            .expect("task should load"),
        reopened
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overdue_query_orders_by_deadline() {
    let Some(tracker) = tokio::task::block_in_place(pg_tracker) else {
        return;
    };
    let owner = seed_user(&tracker, "overdue").await;
    let project = tracker
        .projects()
        .create_project(owner.id().value(), "Backlog", None)
        .await
        .expect("project should be created");
    let mut saved = Vec::new();
    for (title, days_late) in [("Recent miss", 1), ("Old miss", 5)] {
        let deadline = today()
            .checked_sub_days(Days::new(days_late))
            .expect("date in range");
        let draft = NewTask::new(
            project.id(),
            TaskTitle::new(title).expect("valid title"),
            None,
            Priority::Low,
            Some(deadline),
            &DefaultClock,
        );
        saved.push(
            TaskRepository::save(tracker.store().as_ref(), &draft)
                .await
                .expect("task should be stored"),
        );
    }

    let overdue = tracker
        .queries()
        .find_overdue_in_project(project.id().value())
        .await
        .expect("query should succeed");

    let titles: Vec<&str> = overdue.iter().map(|task| task.title().as_str()).collect();
    assert_eq!(titles, ["Old miss", "Recent miss"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_user_cascades_to_projects_and_tasks() {
    let Some(tracker) = tokio::task::block_in_place(pg_tracker) else {
        return;
    };
    let owner = seed_user(&tracker, "cascade").await;
    let mut project_ids: Vec<ProjectId> = Vec::new();
    for name in ["Launch", "Docs"] {
        let project = tracker
            .projects()
            .create_project(owner.id().value(), name, None)
            .await
            .expect("project should be created");
        tracker
            .tasks()
            .create_task(
                CreateTaskRequest::new(project.id().value(), "Write spec")
                    .with_priority(Priority::Medium),
            )
            .await
            .expect("task should be created");
        project_ids.push(project.id());
    }

    let removed = tracker
        .cascade()
        .delete_user(owner.id().value())
        .await
        .expect("cascade should succeed");

    assert!(removed);
    assert!(
        tracker
            .users()
            .find_user_by_id(owner.id().value())
            .await
            .expect("lookup should succeed")
            .is_none()
    );
    for project_id in project_ids {
        assert!(
            !tracker
                .queries()
                .project_has_tasks(project_id.value())
                .await
                .expect("count should succeed")
        );
        assert!(
            tracker
                .projects()
                .find_project_by_id(project_id.value())
                .await
                .expect("lookup should succeed")
                .is_none()
        );
    }
}
