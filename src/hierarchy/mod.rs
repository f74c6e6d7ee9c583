//! Ownership hierarchy and cascading deletion.
//!
//! Users own projects and projects own tasks. Removing a user or a
//! project removes everything beneath it in one atomic unit, so no
//! project outlives its owner and no task outlives its project.
//!
//! [`services::CascadeService`] reads the subtree and builds a
//! [`domain::CascadePlan`]; the store executes the plan through
//! [`ports::HierarchyRepository`].

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
