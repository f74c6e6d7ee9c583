//! Events published by task services.

mod event;

pub use event::{TaskEvent, TaskEventKind};
