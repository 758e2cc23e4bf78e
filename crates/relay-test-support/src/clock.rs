//! Test clock: a pinned `Clock`.

use chrono::{DateTime, TimeZone, Utc};
use relay_core::clock::Clock;

/// A clock stuck at one instant.
///
/// `FixedClock::default()` is 2026-01-15T10:00:00Z, the instant the
/// integration tests assert against.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(
            Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0)
                .single()
                .unwrap_or_default(),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
