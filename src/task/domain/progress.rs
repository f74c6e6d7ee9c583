//! Completion arithmetic for a project's tasks.

use serde::{Deserialize, Serialize};

/// Done and total task counts for one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectProgress {
    /// Number of tasks in the project.
    pub total: u64,
    /// Number of those tasks with status `Done`.
    pub done: u64,
}

impl ProjectProgress {
    /// Creates a progress snapshot.
    #[must_use]
    pub const fn new(total: u64, done: u64) -> Self {
        Self { total, done }
    }

    /// Returns the truncated completion percentage.
    ///
    /// A project without tasks is 0% complete.
    #[must_use]
    #[expect(
        clippy::integer_division,
        clippy::integer_division_remainder_used,
        reason = "completion percentage is defined as a truncated integer ratio"
    )]
    pub fn percentage(self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let done = self.done.min(self.total);
        u8::try_from(done.saturating_mul(100) / self.total).unwrap_or(100)
    }
}
