//! Timestamp helpers for persisted unix-second fields.

use chrono::{DateTime, Utc};

/// Converts a timestamp into the unix seconds stored in profile files.
pub fn unix_seconds(at: DateTime<Utc>) -> i64 {
    at.timestamp()
}

/// Splits a timestamp into the `(date, time)` strings attached to mail
/// system data, e.g. `("2024-01-15", "10:30")`.
pub fn mail_date_parts(at: DateTime<Utc>) -> (String, String) {
    (
        at.format("%Y-%m-%d").to_string(),
        at.format("%H:%M").to_string(),
    )
}
