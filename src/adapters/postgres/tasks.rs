//! [`TaskRepository`] for [`PostgresStore`].

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
    store::{PostgresStore, to_count},
};
use crate::{
    project::domain::ProjectId,
    task::{
        domain::{NewTask, Priority, Task, TaskId, TaskStatus},
        ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    },
};
use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

fn to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    row.into_domain().map_err(TaskRepositoryError::persistence)
}

fn load_tasks(
    connection: &mut PgConnection,
    query: tasks::BoxedQuery<'static, Pg>,
) -> TaskRepositoryResult<Vec<Task>> {
    query
        .select(TaskRow::as_select())
        .load::<TaskRow>(connection)
        .map_err(TaskRepositoryError::persistence)?
        .into_iter()
        .map(to_task)
        .collect()
}

fn newest_first() -> tasks::BoxedQuery<'static, Pg> {
    tasks::table
        .order((tasks::created_at.desc(), tasks::id.desc()))
        .into_boxed()
}

fn open_with_deadline_earliest_first() -> tasks::BoxedQuery<'static, Pg> {
    tasks::table
        .filter(tasks::deadline.is_not_null())
        .filter(tasks::status.ne(TaskStatus::Done.as_str()))
        .order((tasks::deadline.asc(), tasks::id.asc()))
        .into_boxed()
}

#[async_trait]
impl TaskRepository for PostgresStore {
    async fn save(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let project_id = task.project_id();
        let row = NewTaskRow::from(task);
        self.run_blocking(move |connection| {
            let stored = diesel::insert_into(tasks::table)
                .values(&row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaskRepositoryError::ProjectNotFound(project_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            to_task(stored)
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let id = task.id();
        let changeset = TaskChangeset::from(task);
        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.find(id.value()))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.find(id.value()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.value())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(to_task).transpose()
        })
        .await
    }

    async fn find_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let query = newest_first().filter(tasks::project_id.eq(project_id.value()));
            load_tasks(connection, query)
        })
        .await
    }

    async fn find_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let query = newest_first().filter(tasks::status.eq(status.as_str()));
            load_tasks(connection, query)
        })
        .await
    }

    async fn find_by_priority(&self, priority: Priority) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let query = newest_first().filter(tasks::priority.eq(priority.as_str()));
            load_tasks(connection, query)
        })
        .await
    }

    async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(|connection| load_tasks(connection, newest_first()))
            .await
    }

    async fn find_open_due_by(&self, date: NaiveDate) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let query = open_with_deadline_earliest_first().filter(tasks::deadline.le(date));
            load_tasks(connection, query)
        })
        .await
    }

    async fn find_overdue(&self, today: NaiveDate) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let query = open_with_deadline_earliest_first().filter(tasks::deadline.lt(today));
            load_tasks(connection, query)
        })
        .await
    }

    async fn count_by_project_and_status(
        &self,
        project_id: ProjectId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let count = tasks::table
                .filter(tasks::project_id.eq(project_id.value()))
                .filter(tasks::status.eq(status.as_str()))
                .count()
                .get_result::<i64>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            to_count(count)
        })
        .await
    }

    async fn count_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let count = tasks::table
                .filter(tasks::project_id.eq(project_id.value()))
                .count()
                .get_result::<i64>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            to_count(count)
        })
        .await
    }
}
