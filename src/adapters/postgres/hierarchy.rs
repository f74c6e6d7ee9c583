//! [`HierarchyRepository`] for [`PostgresStore`].
//!
//! Each plan runs in one transaction. The `ON DELETE CASCADE` foreign keys
//! remain as a backstop; rows are still removed child-first so
//! [`CascadeOutcome`] reflects what was deleted.

use super::{
    schema::{projects, tasks, users},
    store::PostgresStore,
};
use crate::{
    hierarchy::{
        domain::{CascadeOutcome, CascadePlan, CascadeRoot},
        ports::{HierarchyRepository, HierarchyRepositoryError, HierarchyRepositoryResult},
    },
    task::domain::TaskId,
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;

fn delete_subtree(
    connection: &mut PgConnection,
    root: CascadeRoot,
    mut project_ids: Vec<i64>,
    task_ids: &[i64],
) -> Result<Option<(usize, Vec<i64>)>, DieselError> {
    match root {
        CascadeRoot::User(user_id) => {
            let exists = users::table
                .find(user_id.value())
                .select(users::id)
                .for_update()
                .first::<i64>(connection)
                .optional()?;
            if exists.is_none() {
                return Ok(None);
            }
            let owned: Vec<i64> = projects::table
                .filter(projects::user_id.eq(user_id.value()))
                .select(projects::id)
                .load(connection)?;
            project_ids.extend(owned);
        }
        CascadeRoot::Project(project_id) => {
            let exists = projects::table
                .find(project_id.value())
                .select(projects::id)
                .for_update()
                .first::<i64>(connection)
                .optional()?;
            if exists.is_none() {
                return Ok(None);
            }
        }
    }
    project_ids.sort_unstable();
    project_ids.dedup();

    let mut removed_task_ids: Vec<i64> = diesel::delete(
        tasks::table.filter(
            tasks::project_id
                .eq_any(&project_ids)
                .or(tasks::id.eq_any(task_ids)),
        ),
    )
    .returning(tasks::id)
    .get_results(connection)?;
    removed_task_ids.sort_unstable();
    let projects_removed =
        diesel::delete(projects::table.filter(projects::id.eq_any(&project_ids)))
            .execute(connection)?;
    if let CascadeRoot::User(user_id) = root {
        diesel::delete(users::table.find(user_id.value())).execute(connection)?;
    }
    Ok(Some((projects_removed, removed_task_ids)))
}

#[async_trait]
impl HierarchyRepository for PostgresStore {
    async fn execute(&self, plan: &CascadePlan) -> HierarchyRepositoryResult<CascadeOutcome> {
        let root = plan.root();
        let project_ids: Vec<i64> = plan.project_ids().iter().map(|id| id.value()).collect();
        let task_ids: Vec<i64> = plan.task_ids().iter().map(|id| id.value()).collect();

        self.run_blocking(move |connection| {
            let removed = connection
                .transaction::<_, DieselError, _>(|tx| {
                    delete_subtree(tx, root, project_ids, &task_ids)
                })
                .map_err(HierarchyRepositoryError::persistence)?;
            let Some((projects_removed, raw_task_ids)) = removed else {
                return Ok(CascadeOutcome::default());
            };
            let removed_task_ids = raw_task_ids
                .into_iter()
                .map(TaskId::new)
                .collect::<Result<Vec<_>, _>>()
                .map_err(HierarchyRepositoryError::persistence)?;
            Ok(CascadeOutcome {
                root_removed: true,
                projects_removed: u64::try_from(projects_removed)
                    .map_err(HierarchyRepositoryError::persistence)?,
                removed_task_ids,
            })
        })
        .await
    }
}
