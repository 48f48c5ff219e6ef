// Timestamp parsing and relative-time rendering.
//
// Snapshot timestamps are plain strings. Accepted forms: RFC 3339,
// `YYYY-MM-DDTHH:MM:SS` (read as UTC) and `YYYY-MM-DD` (midnight UTC).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimestampError {
    #[error("timestamp is empty")]
    Empty,

    #[error("unrecognized timestamp `{0}`")]
    Unrecognized(String),
}

/// Parse a snapshot timestamp.
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, TimestampError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimestampError::Empty);
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }

    Err(TimestampError::Unrecognized(trimmed.to_string()))
}

/// Parse a snapshot timestamp, treating anything unparseable as absent.
pub fn parse_timestamp_lenient(input: &str) -> Option<DateTime<Utc>> {
    parse_timestamp(input).ok()
}

/// Render `ts` relative to `now`: "just now", "5m ago", "in 3d", ...
pub fn format_relative(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(ts);
    let future = delta.num_seconds() < 0;
    let secs = delta.num_seconds().unsigned_abs();

    let amount = if secs < 60 {
        return "just now".to_string();
    } else if secs < 3_600 {
        format!("{}m", secs / 60)
    } else if secs < 86_400 {
        format!("{}h", secs / 3_600)
    } else if secs < 86_400 * 30 {
        format!("{}d", secs / 86_400)
    } else {
        return ts.format("%b %-d, %Y").to_string();
    };

    if future {
        format!("in {amount}")
    } else {
        format!("{amount} ago")
    }
}
