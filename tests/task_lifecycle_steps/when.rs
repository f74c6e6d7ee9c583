//! When steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use chrono::Days;
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::when;
use worktrack::{
    calendar,
    task::{
        domain::{Priority, TaskStatus},
        services::CreateTaskRequest,
    },
};

#[when(r#"the task status is set to "{status}""#)]
fn set_task_status(world: &mut TaskLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let target = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let task_id = world.task()?.id().value();
    let updated = run_async(world.tracker.tasks().update_status(task_id, target))
        .wrap_err("set task status")?
        .ok_or_else(|| eyre::eyre!("scenario task vanished"))?;
    world.task = Some(updated);
    Ok(())
}

#[when(r#"a "{priority}" priority task "{title}" is created due {days:u64} days ago"#)]
fn create_task_due_in_past(
    world: &mut TaskLifecycleWorld,
    priority: String,
    title: String,
    days: u64,
) -> Result<(), eyre::Report> {
    let level = Priority::try_from(priority.as_str())
        .map_err(|err| eyre::eyre!("invalid priority in scenario: {err}"))?;
    let deadline = calendar::today(&DefaultClock)
        .checked_sub_days(Days::new(days))
        .ok_or_else(|| eyre::eyre!("deadline out of range"))?;
    let request = CreateTaskRequest::new(world.project()?.id().value(), title)
        .with_priority(level)
        .with_deadline(deadline);
    let result = run_async(world.tracker.tasks().create_task(request));
    if let Ok(ref created) = result {
        world.task = Some(created.clone());
    }
    world.last_create_result = Some(result);
    Ok(())
}

#[when("the user is deleted")]
fn delete_user(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let owner_id = world
        .owner
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing owner in scenario world"))?
        .id()
        .value();
    let removed = run_async(world.tracker.cascade().delete_user(owner_id))
        .wrap_err("delete scenario user")?;
    eyre::ensure!(removed, "scenario user should have been removed");
    Ok(())
}
