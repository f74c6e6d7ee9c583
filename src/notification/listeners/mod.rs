//! Stock task listeners.

mod audit;
mod deadline;
mod statistics;

pub use audit::{AuditAction, AuditEntry, AuditTrail};
pub use deadline::{AlertKind, DeadlineAlert, DeadlineNotifier, URGENT_WINDOW_DAYS, WEEK_WINDOW_DAYS};
pub use statistics::ProjectStatistics;
