//! User accounts: the root of the ownership hierarchy.
//!
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Orchestration services in [`services`]
//!
//! Deleting a user removes everything it owns and is handled by
//! [`crate::hierarchy`].

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
