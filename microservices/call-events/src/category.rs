//! Call event categories and their destination tables
//!
//! The category set is closed. Every table identifier and INSERT statement
//! below is a string literal, so nothing a caller sends can reach an SQL
//! identifier position.

use std::fmt;
use std::str::FromStr;

use crate::error::CallEventError;

macro_rules! insert_statement {
    ($table:literal) => {
        concat!(
            "INSERT INTO ",
            $table,
            " (callID, dispnumber, caller_id, start_time, answer_stamp, end_time, \
             callType, call_duration, destination, status, resource_url, missedFrom, hangup_cause) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)"
        )
    };
}

/// Telephony event classification, each bound to exactly one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallCategory {
    AnsweredOutbound,
    AnsweredInbound,
    MissedOutbound,
    MissedInbound,
}

impl CallCategory {
    pub const ALL: [CallCategory; 4] = [
        CallCategory::AnsweredOutbound,
        CallCategory::AnsweredInbound,
        CallCategory::MissedOutbound,
        CallCategory::MissedInbound,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AnsweredOutbound => "answered_outbound",
            Self::AnsweredInbound => "answered_inbound",
            Self::MissedOutbound => "missed_outbound",
            Self::MissedInbound => "missed_inbound",
        }
    }

    pub const fn table_name(self) -> &'static str {
        match self {
            Self::AnsweredOutbound => "answered_outbound_calls",
            Self::AnsweredInbound => "answered_inbound_calls",
            Self::MissedOutbound => "missed_outbound_calls",
            Self::MissedInbound => "missed_inbound_calls",
        }
    }

    /// Webhook path the telephony provider posts this category to.
    pub const fn route(self) -> &'static str {
        match self {
            Self::AnsweredOutbound => "/answered-outbound",
            Self::AnsweredInbound => "/answered-inbound",
            Self::MissedOutbound => "/missed-outbound",
            Self::MissedInbound => "/missed-inbound",
        }
    }

    pub const fn insert_sql(self) -> &'static str {
        match self {
            Self::AnsweredOutbound => insert_statement!("answered_outbound_calls"),
            Self::AnsweredInbound => insert_statement!("answered_inbound_calls"),
            Self::MissedOutbound => insert_statement!("missed_outbound_calls"),
            Self::MissedInbound => insert_statement!("missed_inbound_calls"),
        }
    }
}

impl FromStr for CallCategory {
    type Err = CallEventError;

    /// Accepts either the category identifier or its table name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s || c.table_name() == s)
            .ok_or_else(|| CallEventError::InvalidCategory(s.to_string()))
    }
}

impl fmt::Display for CallCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
