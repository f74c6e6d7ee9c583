//! Cascading deletion of users and projects.

mod cascade;

pub use cascade::{CascadeError, CascadeResult, CascadeService};
