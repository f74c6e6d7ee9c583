//! Domain model for tasks and their lifecycle.

mod ids;
mod priority;
mod progress;
mod status;
mod task;
mod values;

pub use ids::TaskId;
pub use priority::Priority;
pub use progress::ProjectProgress;
pub use status::{StatusTransition, TaskStatus};
pub use task::{NewTask, PersistedTaskData, Task};
pub use values::{TaskDescription, TaskTitle};
