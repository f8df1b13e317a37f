use chrono::{DateTime, NaiveDateTime};
use serde::Serializer;

/// Layout used for every ISO-8601 timestamp in the report
pub const ISO_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Layout used in human-readable strings (`lastError`, recommendation impact)
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Cuts `text` to at most `max_bytes` bytes and appends `...` when it was longer.
///
/// The cut is moved back to the nearest char boundary so multi-byte
/// characters are never split.
pub fn truncate_with_ellipsis(text: &str, max_bytes: usize) -> String {
    if text.len() <= max_bytes {
        return text.to_string();
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

pub fn format_iso(timestamp: &NaiveDateTime) -> String {
    timestamp.format(ISO_TIMESTAMP_FORMAT).to_string()
}

pub fn format_display(timestamp: &NaiveDateTime) -> String {
    timestamp.format(DISPLAY_TIMESTAMP_FORMAT).to_string()
}

/// serde `serialize_with` helper writing a timestamp as `YYYY-MM-DDTHH:MM:SSZ`
pub fn serialize_iso<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_iso(timestamp))
}

/// Parses a user supplied reference time
///
/// Accepts `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` or RFC 3339. An
/// RFC 3339 offset is dropped and the wall-clock time kept, the same way
/// log timestamps are read.
pub fn parse_reference_time(value: &str) -> Result<NaiveDateTime, String> {
    let value = value.trim();
    for layout in [DISPLAY_TIMESTAMP_FORMAT, "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, layout) {
            return Ok(ts);
        }
    }
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.naive_local())
        .map_err(|_| {
            format!(
                "Invalid reference time: {}. Expected 'YYYY-MM-DD HH:MM:SS' or RFC 3339",
                value
            )
        })
}
