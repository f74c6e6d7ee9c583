//! Projects: named containers of tasks, owned by a user.
//!
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Orchestration services in [`services`]
//!
//! A project's owner never changes after creation. Deleting a project
//! removes its tasks and is handled by [`crate::hierarchy`].

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
