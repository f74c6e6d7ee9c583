//! Thread-safe in-memory store for users, projects and tasks.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{
    hierarchy::{
        domain::{CascadeOutcome, CascadePlan, CascadeRoot},
        ports::{HierarchyRepository, HierarchyRepositoryError, HierarchyRepositoryResult},
    },
    project::{
        domain::{NewProject, Project, ProjectId},
        ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
    },
    task::{
        domain::{NewTask, Priority, Task, TaskId, TaskStatus},
        ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    },
    user::{
        domain::{NewUser, User, UserId},
        ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
    },
};

/// In-memory store implementing every repository port.
///
/// Identities are assigned from per-entity sequences starting at 1.
/// Foreign keys are checked on insert, and cascades run under a single
/// write lock. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

#[derive(Debug, Default)]
struct StoreState {
    user_sequence: i64,
    project_sequence: i64,
    task_sequence: i64,
    users: BTreeMap<UserId, User>,
    username_index: HashMap<String, UserId>,
    projects: BTreeMap<ProjectId, Project>,
    tasks: BTreeMap<TaskId, Task>,
}

impl StoreState {
    fn remove_task_ids(&mut self, ids: &BTreeSet<TaskId>) -> Vec<TaskId> {
        ids.iter()
            .copied()
            .filter(|id| self.tasks.remove(id).is_some())
            .collect()
    }

    fn remove_project_ids(&mut self, ids: &BTreeSet<ProjectId>) -> u64 {
        ids.iter()
            .filter(|id| self.projects.remove(id).is_some())
            .fold(0, |count, _| count + 1)
    }

    fn tasks_under(&self, plan: &CascadePlan, project_ids: &BTreeSet<ProjectId>) -> BTreeSet<TaskId> {
        let mut task_ids: BTreeSet<TaskId> = plan.task_ids().iter().copied().collect();
        task_ids.extend(
            self.tasks
                .values()
                .filter(|task| project_ids.contains(&task.project_id()))
                .map(Task::id),
        );
        task_ids
    }
}

fn next_value(sequence: &mut i64) -> i64 {
    *sequence = sequence.saturating_add(1);
    *sequence
}

fn lock_error(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(err.to_string())
}

fn newest_first<T, K: Ord>(items: &mut [T], key: impl Fn(&T) -> K) {
    items.sort_by(|left, right| key(right).cmp(&key(left)));
}

fn earliest_deadline_first(tasks: &mut [Task]) {
    tasks.sort_by_key(|task| (task.deadline(), task.id()));
}

fn collect_tasks(state: &StoreState, predicate: impl Fn(&Task) -> bool) -> Vec<Task> {
    let mut tasks: Vec<Task> = state
        .tasks
        .values()
        .filter(|task| predicate(task))
        .cloned()
        .collect();
    newest_first(&mut tasks, |task| (task.created_at(), task.id()));
    tasks
}

fn count_tasks(state: &StoreState, predicate: impl Fn(&Task) -> bool) -> u64 {
    state
        .tasks
        .values()
        .filter(|task| predicate(task))
        .fold(0, |count, _| count + 1)
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, std::io::Error> {
        self.state.read().map_err(lock_error)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, std::io::Error> {
        self.state.write().map_err(lock_error)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn save(&self, user: &NewUser) -> UserRepositoryResult<User> {
        let mut state = self.write().map_err(UserRepositoryError::persistence)?;
        if state.username_index.contains_key(user.username().as_str()) {
            return Err(UserRepositoryError::DuplicateUsername(
                user.username().clone(),
            ));
        }

        let id = UserId::new(next_value(&mut state.user_sequence))
            .map_err(UserRepositoryError::persistence)?;
        let stored = user.with_id(id);
        state
            .username_index
            .insert(stored.username().as_str().to_owned(), id);
        state.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let state = self.read().map_err(UserRepositoryError::persistence)?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> UserRepositoryResult<Option<User>> {
        let state = self.read().map_err(UserRepositoryError::persistence)?;
        Ok(state
            .username_index
            .get(username)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn find_all(&self) -> UserRepositoryResult<Vec<User>> {
        let state = self.read().map_err(UserRepositoryError::persistence)?;
        let mut users: Vec<User> = state.users.values().cloned().collect();
        newest_first(&mut users, |user| (user.created_at(), user.id()));
        Ok(users)
    }

    async fn count(&self) -> UserRepositoryResult<u64> {
        let state = self.read().map_err(UserRepositoryError::persistence)?;
        u64::try_from(state.users.len()).map_err(UserRepositoryError::persistence)
    }
}

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn save(&self, project: &NewProject) -> ProjectRepositoryResult<Project> {
        let mut state = self.write().map_err(ProjectRepositoryError::persistence)?;
        if !state.users.contains_key(&project.owner_id()) {
            return Err(ProjectRepositoryError::OwnerNotFound(project.owner_id()));
        }

        let id = ProjectId::new(next_value(&mut state.project_sequence))
            .map_err(ProjectRepositoryError::persistence)?;
        let stored = project.with_id(id);
        state.projects.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.write().map_err(ProjectRepositoryError::persistence)?;
        let existing = state
            .projects
            .get_mut(&project.id())
            .ok_or(ProjectRepositoryError::NotFound(project.id()))?;
        existing.update_details(project.name().clone(), project.description().cloned());
        Ok(())
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.read().map_err(ProjectRepositoryError::persistence)?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner_id: UserId) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.read().map_err(ProjectRepositoryError::persistence)?;
        let mut projects: Vec<Project> = state
            .projects
            .values()
            .filter(|project| project.owner_id() == owner_id)
            .cloned()
            .collect();
        newest_first(&mut projects, |project| (project.created_at(), project.id()));
        Ok(projects)
    }

    async fn find_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.read().map_err(ProjectRepositoryError::persistence)?;
        let mut projects: Vec<Project> = state.projects.values().cloned().collect();
        newest_first(&mut projects, |project| (project.created_at(), project.id()));
        Ok(projects)
    }

    async fn count_by_owner(&self, owner_id: UserId) -> ProjectRepositoryResult<u64> {
        let state = self.read().map_err(ProjectRepositoryError::persistence)?;
        Ok(state
            .projects
            .values()
            .filter(|project| project.owner_id() == owner_id)
            .fold(0, |count, _| count + 1))
    }
}

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn save(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        if !state.projects.contains_key(&task.project_id()) {
            return Err(TaskRepositoryError::ProjectNotFound(task.project_id()));
        }

        let id = TaskId::new(next_value(&mut state.task_sequence))
            .map_err(TaskRepositoryError::persistence)?;
        let stored = task.with_id(id);
        state.tasks.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        let existing = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *existing = task.clone();
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        Ok(state.tasks.remove(&id).is_some())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(collect_tasks(&state, |task| task.project_id() == project_id))
    }

    async fn find_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(collect_tasks(&state, |task| task.status() == status))
    }

    async fn find_by_priority(&self, priority: Priority) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(collect_tasks(&state, |task| task.priority() == priority))
    }

    async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(collect_tasks(&state, |_| true))
    }

    async fn find_open_due_by(&self, date: NaiveDate) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        let mut tasks = collect_tasks(&state, |task| task.is_due_by(date));
        earliest_deadline_first(&mut tasks);
        Ok(tasks)
    }

    async fn find_overdue(&self, today: NaiveDate) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        let mut tasks = collect_tasks(&state, |task| task.is_overdue(today));
        earliest_deadline_first(&mut tasks);
        Ok(tasks)
    }

    async fn count_by_project_and_status(
        &self,
        project_id: ProjectId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<u64> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(count_tasks(&state, |task| {
            task.project_id() == project_id && task.status() == status
        }))
    }

    async fn count_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<u64> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(count_tasks(&state, |task| task.project_id() == project_id))
    }
}

#[async_trait]
impl HierarchyRepository for InMemoryStore {
    async fn execute(&self, plan: &CascadePlan) -> HierarchyRepositoryResult<CascadeOutcome> {
        let mut state = self.write().map_err(HierarchyRepositoryError::persistence)?;
        match plan.root() {
            CascadeRoot::User(user_id) => {
                if !state.users.contains_key(&user_id) {
                    return Ok(CascadeOutcome::default());
                }
                let mut project_ids: BTreeSet<ProjectId> =
                    plan.project_ids().iter().copied().collect();
                project_ids.extend(
                    state
                        .projects
                        .values()
                        .filter(|project| project.owner_id() == user_id)
                        .map(Project::id),
                );
                let task_ids = state.tasks_under(plan, &project_ids);

                let removed_task_ids = state.remove_task_ids(&task_ids);
                let projects_removed = state.remove_project_ids(&project_ids);
                if let Some(user) = state.users.remove(&user_id) {
                    state.username_index.remove(user.username().as_str());
                }
                Ok(CascadeOutcome {
                    root_removed: true,
                    projects_removed,
                    removed_task_ids,
                })
            }
            CascadeRoot::Project(project_id) => {
                if !state.projects.contains_key(&project_id) {
                    return Ok(CascadeOutcome::default());
                }
                let project_ids = BTreeSet::from([project_id]);
                let task_ids = state.tasks_under(plan, &project_ids);

                let removed_task_ids = state.remove_task_ids(&task_ids);
                let projects_removed = state.remove_project_ids(&project_ids);
                Ok(CascadeOutcome {
                    root_removed: true,
                    projects_removed,
                    removed_task_ids,
                })
            }
        }
    }
}
