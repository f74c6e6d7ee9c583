//! Then steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use mockable::DefaultClock;
use rstest_bdd_macros::then;
use worktrack::{
    calendar,
    task::{domain::TaskStatus, services::TaskServiceError},
    validation::ValidationError,
};

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = world.task()?;
    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            task.status().as_str()
        ));
    }
    Ok(())
}

#[then("the task completion date is today")]
fn completion_date_is_today(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let today = calendar::today(&DefaultClock);
    let completed_at = world.task()?.completed_at();
    eyre::ensure!(
        completed_at == Some(today),
        "expected completion on {today}, found {completed_at:?}"
    );
    Ok(())
}

#[then("the task has no completion date")]
fn no_completion_date(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let completed_at = world.task()?.completed_at();
    eyre::ensure!(
        completed_at.is_none(),
        "expected no completion date, found {completed_at:?}"
    );
    Ok(())
}

#[then("the project is {percentage:u8} percent complete")]
fn project_completion_is(
    world: &TaskLifecycleWorld,
    percentage: u8,
) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id().value();
    let actual = run_async(
        world
            .tracker
            .queries()
            .calculate_project_completion(project_id),
    )?;
    eyre::ensure!(
        actual == percentage,
        "expected {percentage}% complete, found {actual}%"
    );
    Ok(())
}

#[then("task creation fails because the deadline is in the past")]
fn creation_fails_with_past_deadline(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_create_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing creation result"))?;
    if !matches!(
        result,
        Err(TaskServiceError::Validation(ValidationError::DeadlineInPast { .. }))
    ) {
        return Err(eyre::eyre!("expected DeadlineInPast error, got {result:?}"));
    }
    Ok(())
}

#[then("the project has no tasks")]
fn project_has_no_tasks(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id().value();
    let has_tasks = run_async(world.tracker.queries().project_has_tasks(project_id))?;
    eyre::ensure!(!has_tasks, "expected the project to have no tasks");
    Ok(())
}
