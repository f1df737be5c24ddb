//! DateTime parsing and display helpers.

use chrono::{DateTime, Utc};

/// Parses an RFC3339 timestamp string, returning an error if parsing fails.
///
/// # Examples
///
/// ```
/// use vtt_domain::common::parse_datetime;
/// use chrono::Datelike;
///
/// let dt = parse_datetime("2024-01-15T10:30:00Z").unwrap();
/// assert_eq!(dt.year(), 2024);
/// ```
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

/// Parses an RFC3339 timestamp string, falling back to `default` on error.
pub fn parse_datetime_or(s: &str, default: DateTime<Utc>) -> DateTime<Utc> {
    parse_datetime(s).unwrap_or(default)
}

/// Short label for a log line.
///
/// `"HH:MM"` when `ts` falls on the same UTC calendar day as `now`,
/// otherwise `"Mon D HH:MM"`.
///
/// # Examples
///
/// ```
/// use vtt_domain::common::{format_timestamp, parse_datetime};
///
/// let now = parse_datetime("2024-01-15T18:00:00Z").unwrap();
/// let earlier = parse_datetime("2024-01-15T09:03:00Z").unwrap();
/// let older = parse_datetime("2024-01-05T09:03:00Z").unwrap();
/// assert_eq!(format_timestamp(earlier, now), "09:03");
/// assert_eq!(format_timestamp(older, now), "Jan 5 09:03");
/// ```
pub fn format_timestamp(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if ts.date_naive() == now.date_naive() {
        ts.format("%H:%M").to_string()
    } else {
        ts.format("%b %-d %H:%M").to_string()
    }
}

/// [`format_timestamp`] over a stored RFC3339 string. Unparseable input is
/// returned as-is.
pub fn format_timestamp_str(ts: &str, now: DateTime<Utc>) -> String {
    match parse_datetime(ts) {
        Ok(dt) => format_timestamp(dt, now),
        Err(_) => ts.to_string(),
    }
}
