//! Publication recency rules.

use chrono::{DateTime, TimeDelta, Utc};

/// Length of the window, ending at "now", in which a question counts as
/// recently published.
pub const RECENCY_WINDOW: TimeDelta = TimeDelta::hours(24);

/// Returns whether `publish_time` lies within the recency window ending at
/// `now`.
///
/// Both bounds are inclusive. Future timestamps are never recent. When the
/// window start falls before the earliest representable instant, every past
/// timestamp counts as recent.
#[must_use]
pub fn is_recently_published(publish_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now.checked_sub_signed(RECENCY_WINDOW)
        .is_none_or(|start| start <= publish_time)
        && publish_time <= now
}

/// Returns whether `publish_time` is at or before `now`.
#[must_use]
pub fn is_published(publish_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    publish_time <= now
}
