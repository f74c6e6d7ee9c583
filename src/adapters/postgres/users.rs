//! [`UserRepository`] for [`PostgresStore`].

use super::{
    models::{NewUserRow, UserRow},
    schema::users,
    store::{PostgresStore, to_count},
};
use crate::user::{
    domain::{NewUser, User, UserId},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

fn to_user(row: UserRow) -> UserRepositoryResult<User> {
    row.into_domain().map_err(UserRepositoryError::persistence)
}

#[async_trait]
impl UserRepository for PostgresStore {
    async fn save(&self, user: &NewUser) -> UserRepositoryResult<User> {
        let username = user.username().clone();
        let row = NewUserRow::from(user);
        self.run_blocking(move |connection| {
            let stored = diesel::insert_into(users::table)
                .values(&row)
                .returning(UserRow::as_returning())
                .get_result::<UserRow>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserRepositoryError::DuplicateUsername(username.clone())
                    }
                    _ => UserRepositoryError::persistence(err),
                })?;
            to_user(stored)
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .find(id.value())
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(to_user).transpose()
        })
        .await
    }

    async fn find_by_username(&self, username: &str) -> UserRepositoryResult<Option<User>> {
        let wanted = username.to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::username.eq(&wanted))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(to_user).transpose()
        })
        .await
    }

    async fn find_all(&self) -> UserRepositoryResult<Vec<User>> {
        self.run_blocking(|connection| {
            users::table
                .order((users::created_at.desc(), users::id.desc()))
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?
                .into_iter()
                .map(to_user)
                .collect()
        })
        .await
    }

    async fn count(&self) -> UserRepositoryResult<u64> {
        self.run_blocking(|connection| {
            let count = users::table
                .count()
                .get_result::<i64>(connection)
                .map_err(UserRepositoryError::persistence)?;
            to_count(count)
        })
        .await
    }
}
