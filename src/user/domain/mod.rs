//! Domain model for user accounts.

mod ids;
mod user;
mod values;

pub use ids::UserId;
pub use user::{NewUser, PersistedUserData, User};
pub use values::{EmailAddress, Username};
