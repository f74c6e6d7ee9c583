//! In-memory persistence.

mod store;

pub use store::InMemoryStore;
