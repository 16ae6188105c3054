//! JSON replies of the pump controller.
//!
//! Every endpoint answers with either the status object
//! `{"water threshold": 10000, "pump": {"running": true, "time left": 1000}}`
//! or an error object `{"error": "invalid milliseconds value"}`.
//! Durations are milliseconds.

use crate::error::{RemoteError, Result};
use pump_traits::PumpReport;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PumpJson {
    pub running: bool,
    #[serde(rename = "time left", default)]
    pub time_left_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StatusJson {
    #[serde(rename = "water threshold", default)]
    pub water_threshold_ms: Option<u64>,
    pub pump: PumpJson,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Reply {
    Error { error: String },
    Status(StatusJson),
}

impl From<StatusJson> for PumpReport {
    fn from(s: StatusJson) -> Self {
        Self {
            running: s.pump.running,
            time_left: s.pump.time_left_ms.map(Duration::from_millis),
            water_threshold: s.water_threshold_ms.map(Duration::from_millis),
        }
    }
}

/// Decode a controller reply; an error object becomes `RemoteError::Rejected`.
pub fn parse_reply(body: &str) -> Result<PumpReport> {
    match serde_json::from_str::<Reply>(body) {
        Ok(Reply::Status(s)) => Ok(s.into()),
        Ok(Reply::Error { error }) => Err(RemoteError::Rejected(error)),
        // Re-run the strict decode so the error names the missing/invalid field.
        Err(_) => Err(serde_json::from_str::<StatusJson>(body)
            .err()
            .map_or_else(|| RemoteError::Rejected("unrecognised reply".into()), RemoteError::from)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_running_status() {
        let r = parse_reply(
            r#"{"water threshold": 12345, "pump": {  "running": true,   "time left": 1000}}"#,
        )
        .unwrap();
        assert!(r.running);
        assert_eq!(r.time_left, Some(Duration::from_millis(1000)));
        assert_eq!(r.water_threshold, Some(Duration::from_millis(12345)));
    }

    #[test]
    fn tolerates_extra_and_missing_optional_fields() {
        let r = parse_reply(r#"{"time": 123, "pump": {"running": false}}"#).unwrap();
        assert!(!r.running);
        assert_eq!(r.time_left, None);
        assert_eq!(r.water_threshold, None);
    }

    #[test]
    fn error_object_is_rejection() {
        match parse_reply(r#"{ "error": "invalid milliseconds value" }"#) {
            Err(RemoteError::Rejected(m)) => assert_eq!(m, "invalid milliseconds value"),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn garbage_is_decode_error() {
        match parse_reply("<html>oops</html>") {
            Err(RemoteError::Decode(_)) => {}
            other => panic!("expected decode error, got {other:?}"),
        }
    }
}
