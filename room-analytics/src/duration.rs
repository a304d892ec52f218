//! Human-readable session durations.

use chrono::{DateTime, Utc};

/// Rendered in place of a duration for sessions without an end instant.
pub const ONGOING: &str = "Ongoing";

/// Formats the elapsed time between `start` and `end`.
///
/// Returns [`ONGOING`] when `end` is absent. Otherwise the elapsed time is
/// truncated to whole minutes and rendered as `"{m}m"` below one hour or
/// `"{h}h {m}m"` from one hour on. Zero or negative spans render as `"0m"`.
pub fn format(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> String {
    let Some(end) = end else {
        return ONGOING.to_string();
    };

    let total_minutes = (end - start).num_minutes().max(0);
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}
