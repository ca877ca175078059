//! Call event record built from one webhook payload

use chrono::NaiveDateTime;
use serde_json::{Map, Value};

use crate::normalize::normalize_timestamp;

/// Payload keys bound by the INSERT, in parameter order.
pub const FIELD_NAMES: [&str; 13] = [
    "callID",
    "dispnumber",
    "caller_id",
    "start_time",
    "answer_stamp",
    "end_time",
    "callType",
    "call_duration",
    "destination",
    "status",
    "resource_url",
    "missedFrom",
    "hangup_cause",
];

/// One call event, ready to insert.
///
/// Built per request and dropped after the insert. Any field may be `None`;
/// keys outside [`FIELD_NAMES`] are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallEventRecord {
    pub call_id: Option<String>,
    pub dispnumber: Option<String>,
    pub caller_id: Option<String>,
    pub start_time: Option<NaiveDateTime>,
    pub answer_stamp: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub call_type: Option<String>,
    pub call_duration: Option<String>,
    pub destination: Option<String>,
    pub status: Option<String>,
    pub resource_url: Option<String>,
    pub missed_from: Option<String>,
    pub hangup_cause: Option<String>,
}

impl CallEventRecord {
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        let text = |key: &str| payload.get(key).and_then(text_value);
        let timestamp = |key: &str| normalize_timestamp(payload.get(key));

        Self {
            call_id: text("callID"),
            dispnumber: text("dispnumber"),
            caller_id: text("caller_id"),
            start_time: timestamp("start_time"),
            answer_stamp: timestamp("answer_stamp"),
            end_time: timestamp("end_time"),
            call_type: text("callType"),
            call_duration: text("call_duration"),
            destination: text("destination"),
            status: text("status"),
            resource_url: text("resource_url"),
            missed_from: text("missedFrom"),
            hangup_cause: text("hangup_cause"),
        }
    }
}

/// Strings bind verbatim, null binds NULL, anything else binds as its
/// compact JSON text (so `42` becomes `"42"`).
fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
