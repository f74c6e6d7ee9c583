//! Event dispatch.

mod hub;

pub use hub::{DispatchReport, FailureReason, ListenerFailure, NotificationHub};
