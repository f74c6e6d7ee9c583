//! Connection pool ownership and blocking execution for the `PostgreSQL`
//! store.

use crate::{
    hierarchy::ports::HierarchyRepositoryError, project::ports::ProjectRepositoryError,
    task::ports::TaskRepositoryError, user::ports::UserRepositoryError,
};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// `PostgreSQL` connection pool type used by the store.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Idempotent schema for users, projects and tasks.
pub const SCHEMA_SQL: &str =
    include_str!("../../../migrations/2026-01-05-000000_create_hierarchy_tables/up.sql");

/// Errors raised while connecting to or preparing the database.
#[derive(Debug, Error)]
pub enum StoreSetupError {
    /// The connection pool could not be built or a connection acquired.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
    /// Applying the schema failed.
    #[error("schema error: {0}")]
    Schema(#[from] diesel::result::Error),
    /// The blocking worker panicked or was cancelled.
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// `PostgreSQL`-backed store implementing every repository port.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store from an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Builds a pool of at most `max_size` connections to `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreSetupError::Pool`] when the pool cannot be built.
    pub fn connect(database_url: &str, max_size: u32) -> Result<Self, StoreSetupError> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder().max_size(max_size).build(manager)?;
        tracing::info!(max_size, "postgres connection pool ready");
        Ok(Self::new(pool))
    }

    /// Returns the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the tables and indexes if they do not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreSetupError`] when no connection is available or a
    /// statement fails.
    pub async fn apply_schema(&self) -> Result<(), StoreSetupError> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<(), StoreSetupError> {
            let mut connection = pool.get()?;
            connection.batch_execute(SCHEMA_SQL)?;
            Ok(())
        })
        .await??;
        tracing::info!("postgres schema applied");
        Ok(())
    }

    pub(super) async fn run_blocking<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: PersistenceFailure + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(E::from_persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(E::from_persistence)?
    }
}

/// Repository errors that can wrap an arbitrary storage failure.
pub(super) trait PersistenceFailure: Sized {
    fn from_persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self;
}

impl PersistenceFailure for UserRepositoryError {
    fn from_persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl PersistenceFailure for ProjectRepositoryError {
    fn from_persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl PersistenceFailure for TaskRepositoryError {
    fn from_persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl PersistenceFailure for HierarchyRepositoryError {
    fn from_persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

/// Converts a database count to `u64`.
pub(super) fn to_count<E: PersistenceFailure>(count: i64) -> Result<u64, E> {
    u64::try_from(count).map_err(E::from_persistence)
}
