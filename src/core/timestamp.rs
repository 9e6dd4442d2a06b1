use chrono::{DateTime, Utc};

/// Format expected by the gateway for `Timestamp` and password derivation
pub const GATEWAY_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Format a UTC instant as a 14-digit gateway timestamp (`YYYYMMDDHHmmss`).
/// Sub-second precision is dropped.
pub fn gateway_timestamp(time: DateTime<Utc>) -> String {
    time.format(GATEWAY_TIMESTAMP_FORMAT).to_string()
}

/// Gateway timestamp for the current instant
pub fn now_gateway_timestamp() -> String {
    gateway_timestamp(Utc::now())
}
