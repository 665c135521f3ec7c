//! Source of the current time for stamped output.

use chrono::{DateTime, Utc};

#[cfg(test)]
use mockall::automock;

/// Supplies "now". Mocked in tests so exported files are deterministic.
#[cfg_attr(test, automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
pub(crate) fn fixed_clock(iso: &str) -> MockClock {
    let instant: DateTime<Utc> = iso.parse().expect("valid RFC 3339 timestamp");
    let mut clock = MockClock::new();
    clock.expect_now().return_const(instant);
    clock
}
