//! Field normalization for webhook payloads

use chrono::NaiveDateTime;
use serde_json::Value;
use tracing::warn;

/// Wall-clock format the telephony provider uses for call timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a raw payload value into a timestamp.
///
/// Absent, null, non-string and empty values yield `None` silently. A string
/// that does not match [`TIMESTAMP_FORMAT`] logs a warning and yields `None`;
/// it never fails the request. No timezone conversion is applied.
pub fn normalize_timestamp(raw: Option<&Value>) -> Option<NaiveDateTime> {
    let text = match raw {
        Some(Value::String(text)) if !text.is_empty() => text,
        _ => return None,
    };

    match NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT) {
        Ok(timestamp) => Some(timestamp),
        Err(e) => {
            warn!(value = %text, error = %e, "Invalid datetime format");
            None
        }
    }
}
