//! Relative timestamp formatting.

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Current Unix timestamp in seconds.
#[must_use]
pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Formats how long ago `timestamp` was, relative to the current time.
///
/// - Less than 1 minute: "just now"
/// - Less than 1 hour: "Xm ago"
/// - Less than 1 day: "Xh ago"
/// - Otherwise: "Xd ago"
#[must_use]
pub fn time_ago(timestamp: i64) -> String {
    time_ago_from(timestamp, now())
}

/// Same as [`time_ago`] with an explicit reference time.
#[must_use]
pub fn time_ago_from(timestamp: i64, now: i64) -> String {
    let diff = now.saturating_sub(timestamp);

    if diff < SECONDS_PER_MINUTE {
        "just now".to_string()
    } else if diff < SECONDS_PER_HOUR {
        format!("{}m ago", diff / SECONDS_PER_MINUTE)
    } else if diff < SECONDS_PER_DAY {
        format!("{}h ago", diff / SECONDS_PER_HOUR)
    } else {
        format!("{}d ago", diff / SECONDS_PER_DAY)
    }
}
