//! ISO-8601 UTC timestamps
//!
//! Timestamps are stored as strings with microsecond precision and a fixed
//! `+00:00` offset, so lexicographic order is chronological order.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// Current instant as a timestamp string
pub fn now() -> String {
    format(Utc::now())
}

/// Encode an instant in the stored timestamp format
pub fn format(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// A timestamp for the current instant, strictly later than `previous`.
///
/// When the clock has not advanced past `previous` (same microsecond, or a
/// clock step backwards) the result is `previous` plus one microsecond.
/// Unparsable input is ignored.
pub fn after(previous: &str) -> String {
    let now = Utc::now();
    match DateTime::parse_from_rfc3339(previous) {
        Ok(prev) => {
            let prev = prev.with_timezone(&Utc);
            if now > prev {
                format(now)
            } else {
                format(prev + Duration::microseconds(1))
            }
        }
        Err(_) => format(now),
    }
}
