//! Cascading removal through the tracker facade.

use std::sync::Arc;

use super::helpers::{MemoryTracker, seed_owner, task_request, tracker};
use rstest::rstest;
use mockable::DefaultClock;
use worktrack::{
    notification::{
        listeners::{AuditAction, AuditTrail, ProjectStatistics},
        ports::TaskListener,
    },
    task::domain::{ProjectProgress, TaskStatus},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_user_leaves_nothing_behind(
    tracker: MemoryTracker,
) -> Result<(), eyre::Report> {
    let (alice, launch) = seed_owner(&tracker, "alice", "Launch").await?;
    let docs = tracker
        .projects()
        .create_project(alice.id().value(), "Docs", None)
        .await?;
    let (_, kept) = seed_owner(&tracker, "bob", "Kept").await?;
    for project in [&launch, &docs, &kept] {
        tracker
            .tasks()
            .create_task(task_request(project, "Write spec"))
            .await?;
    }

    eyre::ensure!(
        tracker.cascade().delete_user(alice.id().value()).await?,
        "existing user should be removed"
    );

    eyre::ensure!(
        tracker.users().find_user_by_id(alice.id().value()).await?.is_none(),
        "user should be gone"
    );
    eyre::ensure!(
        !tracker.users().username_exists("alice").await?,
        "username should be released"
    );
    eyre::ensure!(
        !tracker.projects().user_has_projects(alice.id().value()).await?,
        "projects should be gone"
    );
    let remaining = tracker.queries().find_all().await?;
    eyre::ensure!(
        remaining.len() == 1
            && remaining.iter().all(|task| task.project_id() == kept.id()),
        "only bob's task should remain, found {remaining:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn username_can_be_reused_after_cascade(tracker: MemoryTracker) -> Result<(), eyre::Report> {
    let (alice, _) = seed_owner(&tracker, "alice", "Launch").await?;
    tracker.cascade().delete_user(alice.id().value()).await?;

    let again = tracker
        .users()
        .create_user("alice", "alice@example.com")
        .await?;

    eyre::ensure!(again.id() != alice.id(), "ids should not be reused");
    Ok(())
}

#[rstest]
#[case::empty(0)]
#[case::single(1)]
#[case::several(3)]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_project_keeps_the_owner_and_siblings(
    tracker: MemoryTracker,
    #[case] task_total: usize,
) -> Result<(), eyre::Report> {
    let (alice, launch) = seed_owner(&tracker, "alice", "Launch").await?;
    let docs = tracker
        .projects()
        .create_project(alice.id().value(), "Docs", None)
        .await?;
    for index in 0..task_total {
        tracker
            .tasks()
            .create_task(task_request(&launch, &format!("Step {index}")))
            .await?;
    }
    tracker
        .tasks()
        .create_task(task_request(&docs, "Publish"))
        .await?;
    let trail = Arc::new(AuditTrail::new(Arc::new(DefaultClock)));
    tracker.hub().subscribe(Arc::clone(&trail) as Arc<dyn TaskListener>);

    eyre::ensure!(
        tracker.cascade().delete_project(launch.id().value()).await?,
        "existing project should be removed"
    );
    eyre::ensure!(
        !tracker.cascade().delete_project(launch.id().value()).await?,
        "second removal should report absence"
    );

    eyre::ensure!(
        tracker.users().find_user_by_id(alice.id().value()).await?.is_some(),
        "owner should survive"
    );
    eyre::ensure!(
        tracker.projects().count_projects_by_user(alice.id().value()).await? == 1,
        "sibling project should survive"
    );
    eyre::ensure!(
        tracker.queries().find_by_project(launch.id().value()).await?.is_empty(),
        "tasks of the removed project should be gone"
    );
    eyre::ensure!(
        tracker.queries().project_has_tasks(docs.id().value()).await?,
        "sibling tasks should survive"
    );
    let deletions = trail
        .entries()
        .iter()
        .filter(|entry| entry.action == AuditAction::Delete)
        .count();
    eyre::ensure!(
        deletions == task_total,
        "expected {task_total} deletion events, found {deletions}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cascades_publish_only_deletions(tracker: MemoryTracker) -> Result<(), eyre::Report> {
    let (alice, launch) = seed_owner(&tracker, "alice", "Launch").await?;
    let written = tracker
        .tasks()
        .create_task(task_request(&launch, "Write spec"))
        .await?;
    let trail = Arc::new(AuditTrail::new(Arc::new(DefaultClock)));
    tracker.hub().subscribe(Arc::clone(&trail) as Arc<dyn TaskListener>);

    tracker.cascade().delete_user(alice.id().value()).await?;

    let entries = trail.entries();
    let messages: Vec<&str> = entries.iter().map(|entry| entry.message.as_str()).collect();
    let expected = format!("task deleted: id={}", written.id());
    eyre::ensure!(
        messages == [expected.as_str()],
        "cascade published {messages:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_statistics_follow_cascades(tracker: MemoryTracker) -> Result<(), eyre::Report> {
    let statistics = Arc::new(ProjectStatistics::new());
    tracker.hub().subscribe(Arc::clone(&statistics) as Arc<dyn TaskListener>);
    let (alice, launch) = seed_owner(&tracker, "alice", "Launch").await?;
    let (_, kept) = seed_owner(&tracker, "bob", "Kept").await?;
    let seeded = [
        (&launch, "Write spec"),
        (&launch, "Review spec"),
        (&kept, "Survive"),
    ];
    for (project, title) in seeded {
        let task = tracker.tasks().create_task(task_request(project, title)).await?;
        tracker
            .tasks()
            .update_status(task.id().value(), TaskStatus::Done)
            .await?;
    }

    tracker.cascade().delete_project(launch.id().value()).await?;

    let observed = statistics.progress(launch.id());
    let stored = tracker.queries().project_progress(launch.id().value()).await?;
    eyre::ensure!(
        observed == stored && stored == ProjectProgress::default(),
        "statistics report {observed:?} for a removed project, store reports {stored:?}"
    );

    tracker.cascade().delete_user(alice.id().value()).await?;

    let observed_kept = statistics.progress(kept.id());
    let stored_kept = tracker.queries().project_progress(kept.id().value()).await?;
    eyre::ensure!(
        observed_kept == stored_kept && stored_kept == ProjectProgress::new(1, 1),
        "statistics report {observed_kept:?} for an untouched project, store reports {stored_kept:?}"
    );
    Ok(())
}
