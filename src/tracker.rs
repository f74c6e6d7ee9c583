//! Composition root wiring one store, one clock and one notification hub
//! into every service.

use crate::{
    adapters::{
        memory::InMemoryStore,
        postgres::{PostgresStore, StoreSetupError},
    },
    config::TrackerConfig,
    hierarchy::{ports::HierarchyRepository, services::CascadeService},
    notification::services::NotificationHub,
    project::{ports::ProjectRepository, services::ProjectService},
    task::{
        ports::TaskRepository,
        services::{TaskQueryService, TaskService},
    },
    user::{ports::UserRepository, services::UserService},
};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while assembling a tracker from configuration.
#[derive(Debug, Error)]
pub enum TrackerSetupError {
    /// A database-backed tracker was requested without a database URL.
    #[error("no database URL configured")]
    MissingDatabaseUrl,
    /// The `PostgreSQL` store could not be prepared.
    #[error(transparent)]
    Store(#[from] StoreSetupError),
}

/// All services over a shared store.
///
/// Task listeners subscribed through [`Tracker::hub`] or
/// [`TaskService::subscribe`] observe every task mutation made through
/// this tracker.
pub struct Tracker<S, C>
where
    S: UserRepository + ProjectRepository + TaskRepository + HierarchyRepository,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    hub: Arc<NotificationHub>,
    users: UserService<S, C>,
    projects: ProjectService<S, C>,
    tasks: TaskService<S, C>,
    queries: TaskQueryService<S, C>,
    cascade: CascadeService<S>,
}

impl<S, C> Tracker<S, C>
where
    S: UserRepository + ProjectRepository + TaskRepository + HierarchyRepository,
    C: Clock + Send + Sync,
{
    /// Wires every service over `store` and `clock` with a fresh hub.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        let hub = Arc::new(NotificationHub::new());
        Self {
            users: UserService::new(Arc::clone(&store), Arc::clone(&clock)),
            projects: ProjectService::new(Arc::clone(&store), Arc::clone(&clock)),
            tasks: TaskService::new(Arc::clone(&store), Arc::clone(&clock), Arc::clone(&hub)),
            queries: TaskQueryService::new(Arc::clone(&store), clock),
            cascade: CascadeService::new(Arc::clone(&store), Arc::clone(&hub)),
            store,
            hub,
        }
    }

    /// Returns the shared store.
    #[must_use]
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Returns the hub task events are published to.
    #[must_use]
    pub const fn hub(&self) -> &Arc<NotificationHub> {
        &self.hub
    }

    /// Returns the user service.
    #[must_use]
    pub const fn users(&self) -> &UserService<S, C> {
        &self.users
    }

    /// Returns the project service.
    #[must_use]
    pub const fn projects(&self) -> &ProjectService<S, C> {
        &self.projects
    }

    /// Returns the task mutation service.
    #[must_use]
    pub const fn tasks(&self) -> &TaskService<S, C> {
        &self.tasks
    }

    /// Returns the task query service.
    #[must_use]
    pub const fn queries(&self) -> &TaskQueryService<S, C> {
        &self.queries
    }

    /// Returns the cascading deletion service.
    #[must_use]
    pub const fn cascade(&self) -> &CascadeService<S> {
        &self.cascade
    }
}

impl Tracker<InMemoryStore, DefaultClock> {
    /// Builds a tracker over an empty in-memory store and the system clock.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStore::new()), Arc::new(DefaultClock))
    }
}

impl Tracker<PostgresStore, DefaultClock> {
    /// Connects to the configured database and applies the schema.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerSetupError::MissingDatabaseUrl`] when `config` has
    /// no database URL, and [`TrackerSetupError::Store`] when connecting or
    /// applying the schema fails.
    pub async fn connect(config: &TrackerConfig) -> Result<Self, TrackerSetupError> {
        let url = config
            .database_url
            .clone()
            .ok_or(TrackerSetupError::MissingDatabaseUrl)?;
        let max_size = config.pool_size.get();
        let store = tokio::task::spawn_blocking(move || PostgresStore::connect(&url, max_size))
            .await
            .map_err(StoreSetupError::from)??;
        store.apply_schema().await?;
        Ok(Self::new(Arc::new(store), Arc::new(DefaultClock)))
    }
}
