//! Unit tests for notification dispatch and the stock listeners.


use crate::project::domain::ProjectId;
use crate::task::domain::{NewTask, Priority, Task, TaskId, TaskTitle};
use chrono::NaiveDate;
use mockable::DefaultClock;

fn task(id: i64, project_id: i64, title: &str, deadline: Option<NaiveDate>) -> Task {
    NewTask::new(
        ProjectId::new(project_id).expect("valid id"),
        TaskTitle::new(title).expect("valid title"),
        None,
        Priority::Medium,
        deadline,
        &DefaultClock,
    )
    .with_id(TaskId::new(id).expect("valid id"))
}
