//! Worktrack: hierarchical work-item tracking.
//!
//! Users own projects and projects own tasks. This crate provides the
//! domain layer for that hierarchy: validated entities, the task status
//! lifecycle, cascading deletion, and synchronous notification of task
//! changes to registered listeners.
//!
//! # Architecture
//!
//! Worktrack follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//! - **Services**: Validation, mutation, persistence and notification in
//!   one call
//!
//! # Modules
//!
//! - [`validation`]: Field rules shared by every entity
//! - [`user`], [`project`], [`task`]: Entity model and operations
//! - [`notification`]: Listener registry for task events
//! - [`hierarchy`]: Cascading deletion of users and projects
//! - [`adapters`]: Persistence collaborators
//! - [`tracker`]: Composition root wiring the services together

pub mod adapters;
pub mod calendar;
pub mod config;
pub mod hierarchy;
pub mod notification;
pub mod project;
pub mod task;
pub mod telemetry;
pub mod tracker;
pub mod user;
pub mod validation;
