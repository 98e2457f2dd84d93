//! Signed minutes/seconds remaining on a match, and the "ending soon" check.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Time left on a match. Negative values mean the match has overrun its scheduled end.
///
/// Always normalized: `minutes` and `seconds` share the sign of the total, and
/// `seconds` is within `-59..=59`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct TimeRemaining {
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeRemaining {
    /// Split a signed count of seconds into minutes and seconds.
    pub fn from_seconds(total_seconds: i64) -> Self {
        Self {
            minutes: total_seconds / 60,
            seconds: total_seconds % 60,
        }
    }

    pub fn total_seconds(&self) -> i64 {
        self.minutes * 60 + self.seconds
    }

    pub fn is_overrun(&self) -> bool {
        self.total_seconds() < 0
    }

    /// Less than `threshold_minutes` left, or exactly `threshold_minutes:00`.
    /// `threshold_minutes:01` is not ending soon.
    pub fn is_ending_soon(&self, threshold_minutes: i64) -> bool {
        self.minutes < threshold_minutes || (self.minutes == threshold_minutes && self.seconds == 0)
    }
}

impl Ord for TimeRemaining {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_seconds().cmp(&other.total_seconds())
    }
}

impl PartialOrd for TimeRemaining {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_overrun() { "-" } else { "" };
        write!(f, "{}{}:{:02}", sign, self.minutes.abs(), self.seconds.abs())
    }
}

/// Whole seconds from `from` until `to`, rounded down (half a second past is already -1).
pub fn seconds_until(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_milliseconds().div_euclid(1000)
}
