//! `PostgreSQL` persistence through Diesel.

mod hierarchy;
mod models;
mod projects;
mod schema;
mod store;
mod tasks;
mod users;

pub use store::{PgPool, PostgresStore, SCHEMA_SQL, StoreSetupError};
