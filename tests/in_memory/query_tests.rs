//! Due-date and completion queries through the tracker facade.

use super::helpers::{MemoryTracker, offset, seed_owner, task_request, tracker};
use rstest::rstest;
use worktrack::{
    task::{domain::TaskStatus, services::TaskServiceError},
    validation::ValidationError,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overdue_tasks_surface_after_their_deadline(
    tracker: MemoryTracker,
) -> Result<(), eyre::Report> {
    let (_, project) = seed_owner(&tracker, "alice", "Launch").await?;
    let task = tracker
        .tasks()
        .create_task(task_request(&project, "Write spec").with_deadline(offset(1)?))
        .await?;

    eyre::ensure!(
        tracker.queries().find_overdue().await?.is_empty(),
        "future deadline is not overdue"
    );
    let due = tracker.queries().find_due_in_next_days(1).await?;
    eyre::ensure!(due == [task.clone()], "task should be due within a day");

    let rejected = tracker
        .tasks()
        .update_deadline(task.id().value(), Some(offset(-1)?))
        .await;
    eyre::ensure!(
        matches!(
            rejected,
            Err(TaskServiceError::Validation(ValidationError::DeadlineInPast { .. }))
        ),
        "past deadline should be rejected, got {rejected:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_counts_only_done_tasks(tracker: MemoryTracker) -> Result<(), eyre::Report> {
    let (_, project) = seed_owner(&tracker, "alice", "Launch").await?;
    let project_id = project.id().value();
    let mut ids = Vec::new();
    for title in ["One", "Two", "Three"] {
        let task = tracker
            .tasks()
            .create_task(task_request(&project, title))
            .await?;
        ids.push(task.id().value());
    }
    for id in ids.iter().take(2) {
        tracker.tasks().update_status(*id, TaskStatus::Done).await?;
    }
    if let Some(id) = ids.last() {
        tracker.tasks().update_status(*id, TaskStatus::Paused).await?;
    }

    let progress = tracker.queries().project_progress(project_id).await?;
    eyre::ensure!(
        (progress.total, progress.done) == (3, 2),
        "unexpected progress {progress:?}"
    );
    eyre::ensure!(
        tracker.queries().calculate_project_completion(project_id).await? == 66,
        "two of three tasks is 66%"
    );
    eyre::ensure!(
        tracker
            .queries()
            .count_by_project_and_status(project_id, TaskStatus::Paused)
            .await?
            == 1,
        "one task should be paused"
    );
    eyre::ensure!(
        tracker.queries().find_by_status(TaskStatus::Done).await?.len() == 2,
        "two tasks should be done"
    );
    Ok(())
}
