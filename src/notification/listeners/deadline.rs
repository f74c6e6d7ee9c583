//! Deadline and completion alerts.

use crate::{
    calendar,
    notification::ports::{ListenerError, ListenerResult, TaskListener},
    task::domain::{Task, TaskId},
};
use mockable::Clock;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Days ahead of a deadline that count as urgent.
pub const URGENT_WINDOW_DAYS: i64 = 3;

/// Days ahead of a deadline that still raise a reminder.
pub const WEEK_WINDOW_DAYS: i64 = 7;

/// Classification of a deadline alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKind {
    /// The deadline has passed.
    Overdue {
        /// Whole days since the deadline.
        days_late: i64,
    },
    /// The deadline is within [`URGENT_WINDOW_DAYS`].
    DueSoon {
        /// Whole days until the deadline; zero means today.
        days_left: i64,
    },
    /// The deadline is within [`WEEK_WINDOW_DAYS`].
    DueThisWeek {
        /// Whole days until the deadline.
        days_left: i64,
    },
    /// The task was moved to done.
    Completed,
}

impl AlertKind {
    /// Classifies a deadline that is `days_left` days away.
    ///
    /// Returns `None` when the deadline is further than a week out.
    #[must_use]
    pub const fn for_days_left(days_left: i64) -> Option<Self> {
        if days_left < 0 {
            Some(Self::Overdue {
                days_late: days_left.saturating_neg(),
            })
        } else if days_left <= URGENT_WINDOW_DAYS {
            Some(Self::DueSoon { days_left })
        } else if days_left <= WEEK_WINDOW_DAYS {
            Some(Self::DueThisWeek { days_left })
        } else {
            None
        }
    }
}

/// An alert raised for one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineAlert {
    /// Task the alert is about.
    pub task_id: TaskId,
    /// Task title when the alert was raised.
    pub title: String,
    /// Alert classification.
    pub kind: AlertKind,
}

impl fmt::Display for DeadlineAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AlertKind::Overdue { days_late } => {
                write!(f, "task '{}' is {days_late} day(s) overdue", self.title)
            }
            AlertKind::DueSoon { days_left } | AlertKind::DueThisWeek { days_left } => {
                write!(f, "task '{}' is due in {days_left} day(s)", self.title)
            }
            AlertKind::Completed => write!(f, "task '{}' completed", self.title),
        }
    }
}

/// Listener that warns about approaching or missed deadlines.
///
/// Deadlines are checked when a task is created or updated. Moving a task
/// to done raises a completion alert instead.
pub struct DeadlineNotifier<C>
where
    C: Clock + Send + Sync,
{
    clock: Arc<C>,
    alerts: Mutex<Vec<DeadlineAlert>>,
}

impl<C> DeadlineNotifier<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a notifier that reads the current date from `clock`.
    #[must_use]
    pub const fn new(clock: Arc<C>) -> Self {
        Self {
            clock,
            alerts: Mutex::new(Vec::new()),
        }
    }

    /// Returns a copy of every alert raised so far.
    #[must_use]
    pub fn alerts(&self) -> Vec<DeadlineAlert> {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn check_deadline(&self, task: &Task) -> ListenerResult {
        let Some(deadline) = task.deadline() else {
            return Ok(());
        };
        let days_left = (deadline - calendar::today(&*self.clock)).num_days();
        match AlertKind::for_days_left(days_left) {
            Some(kind) => self.raise(task, kind),
            None => Ok(()),
        }
    }

    fn raise(&self, task: &Task, kind: AlertKind) -> ListenerResult {
        let alert = DeadlineAlert {
            task_id: task.id(),
            title: task.title().as_str().to_owned(),
            kind,
        };
        match kind {
            AlertKind::Overdue { .. } | AlertKind::DueSoon { .. } => {
                tracing::warn!(task_id = %alert.task_id, "{alert}");
            }
            AlertKind::DueThisWeek { .. } | AlertKind::Completed => {
                tracing::info!(task_id = %alert.task_id, "{alert}");
            }
        }
        self.alerts
            .lock()
            .map_err(|err| ListenerError::new(err.to_string()))?
            .push(alert);
        Ok(())
    }
}

impl<C> fmt::Debug for DeadlineNotifier<C>
where
    C: Clock + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeadlineNotifier")
            .field("alerts", &self.alerts().len())
            .finish_non_exhaustive()
    }
}

impl<C> TaskListener for DeadlineNotifier<C>
where
    C: Clock + Send + Sync,
{
    fn on_task_created(&self, task: &Task) -> ListenerResult {
        self.check_deadline(task)
    }

    fn on_task_updated(&self, task: &Task) -> ListenerResult {
        self.check_deadline(task)
    }

    fn on_task_status_changed(&self, task: &Task) -> ListenerResult {
        if task.is_done() {
            self.raise(task, AlertKind::Completed)
        } else {
            Ok(())
        }
    }

    fn on_task_deleted(&self, _task_id: TaskId) -> ListenerResult {
        Ok(())
    }
}
