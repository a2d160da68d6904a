//! # Time Utilities
//!
//! Clock access and formatting using chrono.

use chrono::{DateTime, Utc};

/// Get current UTC time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Current time as a Unix timestamp in seconds.
pub fn now_timestamp() -> i64 {
    now_utc().timestamp()
}

/// Format time as RFC3339 string.
pub fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339()
}
