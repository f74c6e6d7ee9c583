//! Application services for user accounts.

mod account;

pub use account::{UserService, UserServiceError, UserServiceResult};
