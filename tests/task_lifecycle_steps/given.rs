//! Given steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use worktrack::task::{
    domain::{Priority, TaskStatus},
    services::CreateTaskRequest,
};

#[given(r#"a user "{username}" who owns a project "{project_name}""#)]
fn user_with_project(
    world: &mut TaskLifecycleWorld,
    username: String,
    project_name: String,
) -> Result<(), eyre::Report> {
    let owner = run_async(
        world
            .tracker
            .users()
            .create_user(username.as_str(), format!("{username}@example.com")),
    )
    .wrap_err("create scenario user")?;
    let project = run_async(world.tracker.projects().create_project(
        owner.id().value(),
        project_name,
        None,
    ))
    .wrap_err("create scenario project")?;
    world.owner = Some(owner);
    world.project = Some(project);
    Ok(())
}

#[given(r#"a "{priority}" priority task "{title}" in the project"#)]
fn task_in_project(
    world: &mut TaskLifecycleWorld,
    priority: String,
    title: String,
) -> Result<(), eyre::Report> {
    let level = Priority::try_from(priority.as_str())
        .map_err(|err| eyre::eyre!("invalid priority in scenario: {err}"))?;
    let project_id = world.project()?.id().value();
    let task = run_async(
        world
            .tracker
            .tasks()
            .create_task(CreateTaskRequest::new(project_id, title).with_priority(level)),
    )
    .wrap_err("create scenario task")?;
    world.task = Some(task);
    Ok(())
}

#[given(r#"the task status has been set to "{status}""#)]
fn task_status_has_been_set(
    world: &mut TaskLifecycleWorld,
    status: String,
) -> Result<(), eyre::Report> {
    let target = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let task_id = world.task()?.id().value();
    let updated = run_async(world.tracker.tasks().update_status(task_id, target))
        .wrap_err("set task status in scenario setup")?
        .ok_or_else(|| eyre::eyre!("scenario task vanished"))?;
    world.task = Some(updated);
    Ok(())
}
