//! Port contracts for task event consumers.

pub mod listener;

#[cfg(test)]
pub use listener::MockTaskListener;
pub use listener::{ListenerError, ListenerResult, TaskListener};
