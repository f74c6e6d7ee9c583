//! Listener delivery through the tracker facade.

use std::sync::{Arc, Mutex};

use super::helpers::{MemoryTracker, offset, seed_owner, task_request, tracker};
use mockable::DefaultClock;
use rstest::rstest;
use worktrack::{
    notification::{
        listeners::{AlertKind, AuditAction, AuditTrail, DeadlineNotifier, ProjectStatistics},
        ports::{ListenerError, ListenerResult, TaskListener},
    },
    task::domain::{Task, TaskId, TaskStatus},
};

/// Listener that fails every callback and counts the attempts.
#[derive(Default)]
struct BrokenListener {
    attempts: Mutex<usize>,
}

impl BrokenListener {
    fn fail(&self) -> ListenerResult {
        let mut attempts = self
            .attempts
            .lock()
            .map_err(|err| ListenerError::new(err.to_string()))?;
        *attempts += 1;
        Err(ListenerError::new("downstream unavailable"))
    }

    fn attempts(&self) -> usize {
        self.attempts
            .lock()
            .map(|attempts| *attempts)
            .unwrap_or_default()
    }
}

impl TaskListener for BrokenListener {
    fn on_task_created(&self, _task: &Task) -> ListenerResult {
        self.fail()
    }

    fn on_task_updated(&self, _task: &Task) -> ListenerResult {
        self.fail()
    }

    fn on_task_status_changed(&self, _task: &Task) -> ListenerResult {
        self.fail()
    }

    fn on_task_deleted(&self, _task_id: TaskId) -> ListenerResult {
        self.fail()
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stock_listeners_observe_the_lifecycle(tracker: MemoryTracker) -> Result<(), eyre::Report> {
    let clock = Arc::new(DefaultClock);
    let trail = Arc::new(AuditTrail::new(Arc::clone(&clock)));
    let deadlines = Arc::new(DeadlineNotifier::new(clock));
    let statistics = Arc::new(ProjectStatistics::new());
    tracker.tasks().subscribe(Arc::clone(&trail) as Arc<dyn TaskListener>);
    tracker.tasks().subscribe(Arc::clone(&deadlines) as Arc<dyn TaskListener>);
    tracker.tasks().subscribe(Arc::clone(&statistics) as Arc<dyn TaskListener>);
    let (_, project) = seed_owner(&tracker, "alice", "Launch").await?;

    let task = tracker
        .tasks()
        .create_task(task_request(&project, "Write spec").with_deadline(offset(2)?))
        .await?;
    let id = task.id().value();
    tracker.tasks().update_status(id, TaskStatus::Done).await?;
    tracker.tasks().delete_task(id).await?;

    let actions: Vec<AuditAction> = trail.entries().iter().map(|entry| entry.action).collect();
    eyre::ensure!(
        actions == [AuditAction::Create, AuditAction::StatusChange, AuditAction::Delete],
        "unexpected audit trail {actions:?}"
    );
    let kinds: Vec<AlertKind> = deadlines.alerts().iter().map(|alert| alert.kind).collect();
    eyre::ensure!(
        kinds == [AlertKind::DueSoon { days_left: 2 }, AlertKind::Completed],
        "unexpected alerts {kinds:?}"
    );
    eyre::ensure!(
        statistics.progress(project.id()).total == 0,
        "deleted task should no longer be counted"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failing_listener_does_not_block_mutation_or_peers(
    tracker: MemoryTracker,
) -> Result<(), eyre::Report> {
    let broken = Arc::new(BrokenListener::default());
    let trail = Arc::new(AuditTrail::new(Arc::new(DefaultClock)));
    tracker.tasks().subscribe(Arc::clone(&broken) as Arc<dyn TaskListener>);
    tracker.tasks().subscribe(Arc::clone(&trail) as Arc<dyn TaskListener>);
    let (_, project) = seed_owner(&tracker, "alice", "Launch").await?;

    let task = tracker
        .tasks()
        .create_task(task_request(&project, "Write spec"))
        .await?;
    let updated = tracker
        .tasks()
        .update_status(task.id().value(), TaskStatus::InProgress)
        .await?;

    eyre::ensure!(updated.is_some(), "mutation should succeed");
    eyre::ensure!(broken.attempts() == 2, "broken listener should still be called");
    eyre::ensure!(trail.entries().len() == 2, "peer listener should receive every event");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unsubscribed_listener_stops_receiving(tracker: MemoryTracker) -> Result<(), eyre::Report> {
    let trail = Arc::new(AuditTrail::new(Arc::new(DefaultClock)));
    let listener = Arc::clone(&trail) as Arc<dyn TaskListener>;
    tracker.tasks().subscribe(Arc::clone(&listener));
    let (_, project) = seed_owner(&tracker, "alice", "Launch").await?;

    tracker
        .tasks()
        .create_task(task_request(&project, "First"))
        .await?;
    eyre::ensure!(tracker.tasks().unsubscribe(&listener), "listener should be removed");
    tracker
        .tasks()
        .create_task(task_request(&project, "Second"))
        .await?;

    eyre::ensure!(trail.entries().len() == 1, "only the first event should be seen");
    eyre::ensure!(tracker.hub().listener_count() == 0, "hub should be empty");
    Ok(())
}
