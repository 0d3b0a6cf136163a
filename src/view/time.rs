//! Timestamp display.

use std::fmt::Display;

use chrono::{DateTime, FixedOffset, TimeZone};

/// Display layout for timestamps, e.g. `Mon, 08 Jan 2024 09:00:00 +0000`.
pub const DISPLAY_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Parse a Jira timestamp.
///
/// Agile endpoints return RFC 3339 (`2024-01-08T09:00:00.000Z`); the issue
/// endpoint uses a colon-less offset (`2024-01-15T10:30:00.000+0000`).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .ok()
}

/// Format a timestamp in the given zone. Unparseable input is returned as is.
pub fn format_in<Tz>(raw: &str, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match parse_timestamp(raw) {
        Some(parsed) => parsed.with_timezone(zone).format(DISPLAY_FORMAT).to_string(),
        None => raw.to_string(),
    }
}
