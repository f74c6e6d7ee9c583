//! Application services for task mutation and queries.

mod error;
mod lifecycle;
mod query;

pub use error::{TaskServiceError, TaskServiceResult};
pub use lifecycle::{CreateTaskRequest, TaskService};
pub use query::TaskQueryService;
