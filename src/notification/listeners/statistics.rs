//! Live per-project completion statistics.

use crate::{
    notification::ports::{ListenerError, ListenerResult, TaskListener},
    project::domain::ProjectId,
    task::domain::{ProjectProgress, Task, TaskId},
};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Clone, Copy)]
struct TrackedTask {
    project_id: ProjectId,
    done: bool,
}

/// Listener that maintains task totals per project from the event stream.
///
/// Only tasks seen through events are counted; subscribe it before tasks
/// are created to get complete figures.
#[derive(Debug, Default)]
pub struct ProjectStatistics {
    tasks: Mutex<HashMap<TaskId, TrackedTask>>,
}

impl ProjectStatistics {
    /// Creates an empty statistics listener.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the observed progress of a project.
    #[must_use]
    pub fn progress(&self, project_id: ProjectId) -> ProjectProgress {
        let tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        tasks
            .values()
            .filter(|tracked| tracked.project_id == project_id)
            .fold(ProjectProgress::default(), |progress, tracked| {
                ProjectProgress::new(
                    progress.total.saturating_add(1),
                    progress.done.saturating_add(u64::from(tracked.done)),
                )
            })
    }

    /// Returns the observed completion percentage of a project.
    #[must_use]
    pub fn completion_percentage(&self, project_id: ProjectId) -> u8 {
        self.progress(project_id).percentage()
    }

    fn track(&self, task: &Task) -> ListenerResult {
        let mut tasks = self
            .tasks
            .lock()
            .map_err(|err| ListenerError::new(err.to_string()))?;
        tasks.insert(
            task.id(),
            TrackedTask {
                project_id: task.project_id(),
                done: task.is_done(),
            },
        );
        drop(tasks);
        tracing::debug!(project_id = %task.project_id(), "project statistics refreshed");
        Ok(())
    }
}

impl TaskListener for ProjectStatistics {
    fn on_task_created(&self, task: &Task) -> ListenerResult {
        self.track(task)
    }

    fn on_task_updated(&self, task: &Task) -> ListenerResult {
        self.track(task)
    }

    fn on_task_status_changed(&self, task: &Task) -> ListenerResult {
        self.track(task)
    }

    fn on_task_deleted(&self, task_id: TaskId) -> ListenerResult {
        self.tasks
            .lock()
            .map_err(|err| ListenerError::new(err.to_string()))?
            .remove(&task_id);
        Ok(())
    }
}
