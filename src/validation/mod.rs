//! Stateless input rules applied before any entity is created or mutated.
//!
//! Every rule is a pure function returning `Ok` or a [`ValidationError`]
//! that names the offending field. The validated value types in the
//! entity modules call these rules from their constructors, so a value
//! of such a type is proof that its rule passed.

mod error;
pub mod rules;

pub use error::{Field, ValidationError};

#[cfg(test)]
mod tests;
