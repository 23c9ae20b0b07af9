//! Canonical "now" and the ISO-8601 wire timestamp format.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::errors::EventParseError;

/// Current instant in UTC. Every event timestamp comes from here unless
/// the caller supplies its own.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// ISO-8601 UTC with millisecond precision: `2026-01-03T12:00:00.000Z`.
pub fn format_iso(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a wire timestamp back into UTC. Accepts any RFC 3339 offset and
/// normalizes it.
pub fn parse_iso(value: &str) -> Result<DateTime<Utc>, EventParseError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| EventParseError::InvalidTimestamp {
            value: value.to_string(),
        })
}
