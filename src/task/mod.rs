//! Tasks: the leaves of the ownership hierarchy.
//!
//! Covers the task entity, its status lifecycle and the completion-date
//! side effect, task mutations with listener notification, and the
//! read-only aggregation queries (completion percentage, overdue and
//! due-by lookups, counts). The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
