//! End-to-end lifecycle through the tracker facade.

use super::helpers::{MemoryTracker, seed_owner, task_request, today, tracker};
use rstest::rstest;
use worktrack::{
    task::{
        domain::{Priority, TaskStatus},
        services::{CreateTaskRequest, TaskServiceError},
    },
    validation::{Field, ValidationError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_changes_drive_completion(tracker: MemoryTracker) -> Result<(), eyre::Report> {
    let user = tracker
        .users()
        .create_user("alice", "alice@example.com")
        .await?;
    let project = tracker
        .projects()
        .create_project(user.id().value(), "Launch", Some("desc".to_owned()))
        .await?;
    let task = tracker
        .tasks()
        .create_task(
            CreateTaskRequest::new(project.id().value(), "Write spec")
                .with_priority(Priority::High),
        )
        .await?;
    let project_id = project.id().value();
    let task_id = task.id().value();

    eyre::ensure!(task.status() == TaskStatus::Todo, "new task should be TODO");
    eyre::ensure!(
        tracker.queries().calculate_project_completion(project_id).await? == 0,
        "fresh project should be 0% complete"
    );

    let done = tracker
        .tasks()
        .update_status(task_id, TaskStatus::Done)
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;
    eyre::ensure!(done.completed_at() == Some(today()), "completion date should be today");
    eyre::ensure!(
        tracker.queries().calculate_project_completion(project_id).await? == 100,
        "finished project should be 100% complete"
    );

    let reopened = tracker
        .tasks()
        .update_status(task_id, TaskStatus::InProgress)
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;
    eyre::ensure!(reopened.completed_at().is_none(), "reopening clears completion");
    eyre::ensure!(
        tracker.queries().calculate_project_completion(project_id).await? == 0,
        "reopened project should be 0% complete"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edits_are_persisted(tracker: MemoryTracker) -> Result<(), eyre::Report> {
    let (_, project) = seed_owner(&tracker, "alice", "Launch").await?;
    let task = tracker
        .tasks()
        .create_task(task_request(&project, "Write spec"))
        .await?;
    let id = task.id().value();

    tracker
        .tasks()
        .update_details(id, "Write the spec", Some("first draft".to_owned()))
        .await?;
    tracker.tasks().update_priority(id, Priority::High).await?;

    let stored = tracker.tasks().get_task(id).await?;
    eyre::ensure!(stored.title().as_str() == "Write the spec", "title should change");
    eyre::ensure!(
        stored.description().map(|description| description.as_str()) == Some("first draft"),
        "description should change"
    );
    eyre::ensure!(stored.priority() == Priority::High, "priority should change");
    eyre::ensure!(stored.status() == TaskStatus::Todo, "status should be untouched");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_input_leaves_storage_untouched(
    tracker: MemoryTracker,
) -> Result<(), eyre::Report> {
    let (_, project) = seed_owner(&tracker, "alice", "Launch").await?;

    let missing_priority = tracker
        .tasks()
        .create_task(CreateTaskRequest::new(project.id().value(), "Write spec"))
        .await;
    eyre::ensure!(
        matches!(
            missing_priority,
            Err(TaskServiceError::Validation(ValidationError::Missing {
                field: Field::Priority
            }))
        ),
        "missing priority should be rejected, got {missing_priority:?}"
    );

    let blank_title = tracker
        .tasks()
        .create_task(task_request(&project, "   "))
        .await;
    eyre::ensure!(
        matches!(blank_title, Err(TaskServiceError::Validation(_))),
        "blank title should be rejected, got {blank_title:?}"
    );

    eyre::ensure!(
        !tracker
            .queries()
            .project_has_tasks(project.id().value())
            .await?,
        "no task should have been stored"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn operations_on_missing_tasks_report_absence(
    tracker: MemoryTracker,
) -> Result<(), eyre::Report> {
    eyre::ensure!(
        tracker.tasks().update_status(77, TaskStatus::Done).await?.is_none(),
        "status update of missing task should be None"
    );
    eyre::ensure!(
        !tracker.tasks().delete_task(77).await?,
        "deleting a missing task should return false"
    );
    eyre::ensure!(
        tracker.tasks().find_task_by_id(77).await?.is_none(),
        "lookup of missing task should be None"
    );
    let missing = tracker.tasks().get_task(77).await;
    eyre::ensure!(
        matches!(missing, Err(TaskServiceError::NotFound(_))),
        "get of missing task should fail with NotFound, got {missing:?}"
    );
    Ok(())
}
