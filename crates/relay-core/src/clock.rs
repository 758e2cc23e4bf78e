//! Time source for event timestamps, `Retry-After` dates and integration
//! health.

use chrono::{DateTime, SecondsFormat, Utc};

/// Injected source of "now". Production reads the system clock; tests pin it.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// The current time in wire format; see [`wire_timestamp`].
    fn timestamp(&self) -> String {
        wire_timestamp(self.now())
    }
}

/// Formats an instant as RFC 3339 in UTC with millisecond precision, e.g.
/// `2026-01-15T10:00:00.000Z`.
#[must_use]
pub fn wire_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_wire_timestamp_has_millis_and_zulu_suffix() {
        let time = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        assert_eq!(wire_timestamp(time), "2026-01-15T10:00:00.000Z");
    }
}
