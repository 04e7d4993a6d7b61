//! Clock pinned to a single instant.

use chrono::{DateTime, Local, Utc};
use mockable::Clock;

/// Clock that always reports the same instant.
///
/// Useful for replaying poll operations at a known time, such as rendering
/// the listing as it looked at a past moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Creates a clock reporting `instant`.
    #[must_use]
    pub const fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}
