//! Cascade plans and their outcomes.

mod plan;

pub use plan::{CascadeOutcome, CascadePlan, CascadeRoot};
