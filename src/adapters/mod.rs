//! Persistence adapters implementing every repository port.
//!
//! - [`memory::InMemoryStore`] keeps all entities behind one lock and is
//!   used by tests and by [`crate::tracker::Tracker::in_memory`].
//! - [`postgres::PostgresStore`] stores entities in `PostgreSQL` through
//!   Diesel and an r2d2 pool.

pub mod memory;
pub mod postgres;
