//! Calendar helpers shared by the domain and its listeners.

use chrono::NaiveDate;
use mockable::Clock;

/// Returns the current calendar date as seen by `clock`.
///
/// Dates are taken in UTC so that deadline checks do not depend on the
/// host time zone.
#[must_use]
pub fn today(clock: &impl Clock) -> NaiveDate {
    clock.utc().date_naive()
}
