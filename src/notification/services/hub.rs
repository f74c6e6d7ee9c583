//! Ordered, failure-isolating dispatch of task events.

use crate::notification::{
    domain::{TaskEvent, TaskEventKind},
    ports::{ListenerError, TaskListener},
};
use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, PoisonError, RwLock};

/// Registry of task listeners.
///
/// The same listener may be subscribed more than once and is then invoked
/// once per registration.
#[derive(Default)]
pub struct NotificationHub {
    listeners: RwLock<Vec<Arc<dyn TaskListener>>>,
}

impl fmt::Debug for NotificationHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl NotificationHub {
    /// Creates a hub with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a listener to the dispatch order.
    pub fn subscribe(&self, listener: Arc<dyn TaskListener>) {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        listeners.push(listener);
        tracing::debug!(listeners = listeners.len(), "task listener subscribed");
    }

    /// Removes the first registration of `listener`.
    ///
    /// Listeners are compared by identity. Returns `false` when the
    /// listener was not subscribed.
    #[must_use]
    pub fn unsubscribe(&self, listener: &Arc<dyn TaskListener>) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let position = listeners
            .iter()
            .position(|registered| std::ptr::addr_eq(Arc::as_ptr(registered), Arc::as_ptr(listener)));
        let Some(index) = position else {
            return false;
        };
        listeners.remove(index);
        tracing::debug!(listeners = listeners.len(), "task listener unsubscribed");
        true
    }

    /// Returns the number of registrations.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Delivers `event` to every listener in subscription order.
    ///
    /// The listener list is captured before delivery, so listeners may
    /// subscribe or unsubscribe from inside a callback. Errors and panics
    /// are caught per listener, logged, and collected in the report.
    #[must_use]
    pub fn publish(&self, event: &TaskEvent) -> DispatchReport {
        let snapshot: Vec<Arc<dyn TaskListener>> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let mut report = DispatchReport::new(event.kind());
        for (position, listener) in snapshot.iter().enumerate() {
            let outcome = catch_unwind(AssertUnwindSafe(|| deliver(listener.as_ref(), event)));
            let reason = match outcome {
                Ok(Ok(())) => {
                    report.delivered += 1;
                    continue;
                }
                Ok(Err(err)) => FailureReason::Error(err),
                Err(payload) => FailureReason::Panic(panic_message(payload.as_ref())),
            };
            tracing::warn!(
                event = %event.kind(),
                task_id = %event.task_id(),
                position,
                error = %reason,
                "task listener failed"
            );
            report.failures.push(ListenerFailure { position, reason });
        }
        report
    }
}

fn deliver(listener: &dyn TaskListener, event: &TaskEvent) -> Result<(), ListenerError> {
    match event {
        TaskEvent::Created(task) => listener.on_task_created(task),
        TaskEvent::Updated(task) => listener.on_task_updated(task),
        TaskEvent::StatusChanged(task) => listener.on_task_status_changed(task),
        TaskEvent::Deleted(task_id) => listener.on_task_deleted(*task_id),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "listener panicked".to_owned())
}

/// Outcome of one [`NotificationHub::publish`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    event: TaskEventKind,
    delivered: usize,
    failures: Vec<ListenerFailure>,
}

impl DispatchReport {
    const fn new(event: TaskEventKind) -> Self {
        Self {
            event,
            delivered: 0,
            failures: Vec::new(),
        }
    }

    /// Returns the kind of event that was published.
    #[must_use]
    pub const fn event(&self) -> TaskEventKind {
        self.event
    }

    /// Returns how many listeners handled the event successfully.
    #[must_use]
    pub const fn delivered(&self) -> usize {
        self.delivered
    }

    /// Returns the listeners that failed, in dispatch order.
    #[must_use]
    pub fn failures(&self) -> &[ListenerFailure] {
        &self.failures
    }

    /// Returns whether every listener succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A listener that failed during dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerFailure {
    /// Zero-based position of the registration in dispatch order.
    pub position: usize,
    /// What went wrong.
    pub reason: FailureReason,
}

/// Why a listener failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The listener returned an error.
    Error(ListenerError),
    /// The listener panicked; carries the panic message when it was text.
    Panic(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(err) => write!(f, "{err}"),
            Self::Panic(message) => write!(f, "listener panicked: {message}"),
        }
    }
}
