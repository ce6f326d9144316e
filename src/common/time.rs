use chrono::{DateTime, SecondsFormat};

use crate::common::types::Timestamp;

/// Returns the time duration since UNIX_EPOCH in milliseconds.
pub fn current_time_millis() -> Timestamp {
    chrono::Utc::now().timestamp_millis()
}

/// Renders a millisecond timestamp as RFC 3339. Timestamps outside chrono's range are
/// rendered as the raw number.
pub fn format_timestamp(ts: Timestamp) -> String {
    match DateTime::from_timestamp_millis(ts) {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => ts.to_string(),
    }
}
