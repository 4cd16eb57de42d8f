//! UTC instants stamped on sessions and records.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A UTC instant, serialized as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

/// Second precision, `Z` suffix; used in log lines.
impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_stamps_order_after_earlier_ones() {
        let first = Timestamp::now();
        let second = Timestamp::now();
        assert!(first <= second);
    }

    #[test]
    fn stored_record_stamp_reads_back_and_displays_to_the_second() {
        let ts: Timestamp = serde_json::from_str("\"2025-11-03T10:30:00.250Z\"").unwrap();
        assert_eq!(ts.to_string(), "2025-11-03T10:30:00Z");
        assert_eq!(
            serde_json::to_string(&ts).unwrap(),
            "\"2025-11-03T10:30:00.250Z\""
        );
    }
}
