//! Timestamp helpers.
//!
//! Timestamps are persisted as epoch milliseconds and surfaced as
//! `DateTime<Utc>` everywhere else.

use chrono::{DateTime, Utc};

/// Current time truncated to millisecond precision.
pub fn now_millis() -> DateTime<Utc> {
    from_millis(Utc::now().timestamp_millis())
}

/// Convert stored epoch milliseconds back into a UTC timestamp.
///
/// Out-of-range values clamp to the Unix epoch.
pub fn from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::UNIX_EPOCH)
}

pub fn from_millis_opt(millis: Option<i64>) -> Option<DateTime<Utc>> {
    millis.map(from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_has_millisecond_precision() {
        let now = now_millis();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000_000, 0);
        assert_eq!(from_millis(now.timestamp_millis()), now);
    }

    #[test]
    fn test_optional_conversion() {
        assert!(from_millis_opt(None).is_none());
        assert_eq!(
            from_millis_opt(Some(1_000)).map(|t| t.timestamp()),
            Some(1)
        );
    }
}
