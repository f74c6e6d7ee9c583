//! [`ProjectRepository`] for [`PostgresStore`].

use super::{
    models::{NewProjectRow, ProjectChangeset, ProjectRow},
    schema::projects,
    store::{PostgresStore, to_count},
};
use crate::{
    project::{
        domain::{NewProject, Project, ProjectId},
        ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
    },
    user::domain::UserId,
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

fn to_project(row: ProjectRow) -> ProjectRepositoryResult<Project> {
    row.into_domain().map_err(ProjectRepositoryError::persistence)
}

#[async_trait]
impl ProjectRepository for PostgresStore {
    async fn save(&self, project: &NewProject) -> ProjectRepositoryResult<Project> {
        let owner_id = project.owner_id();
        let row = NewProjectRow::from(project);
        self.run_blocking(move |connection| {
            let stored = diesel::insert_into(projects::table)
                .values(&row)
                .returning(ProjectRow::as_returning())
                .get_result::<ProjectRow>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        ProjectRepositoryError::OwnerNotFound(owner_id)
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })?;
            to_project(stored)
        })
        .await
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let id = project.id();
        let changeset = ProjectChangeset::from(project);
        self.run_blocking(move |connection| {
            let updated = diesel::update(projects::table.find(id.value()))
                .set(&changeset)
                .execute(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            if updated == 0 {
                return Err(ProjectRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .find(id.value())
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(to_project).transpose()
        })
        .await
    }

    async fn find_by_owner(&self, owner_id: UserId) -> ProjectRepositoryResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            projects::table
                .filter(projects::user_id.eq(owner_id.value()))
                .order((projects::created_at.desc(), projects::id.desc()))
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?
                .into_iter()
                .map(to_project)
                .collect()
        })
        .await
    }

    async fn find_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        self.run_blocking(|connection| {
            projects::table
                .order((projects::created_at.desc(), projects::id.desc()))
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?
                .into_iter()
                .map(to_project)
                .collect()
        })
        .await
    }

    async fn count_by_owner(&self, owner_id: UserId) -> ProjectRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let count = projects::table
                .filter(projects::user_id.eq(owner_id.value()))
                .count()
                .get_result::<i64>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            to_count(count)
        })
        .await
    }
}
