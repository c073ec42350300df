//! # Clocks
//!
//! The ledger reads time through [`Clock`] so tests and demos can pin
//! timestamps. Wall-clock monotonicity is not assumed; [`crate::Ledger`]
//! clamps its own stamps instead.

use llock_core::Timestamp;
use parking_lot::Mutex;

/// A source of append timestamps.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Current time, UTC, seconds precision.
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A settable clock.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<Timestamp>,
}

impl FixedClock {
    /// Create a clock frozen at `now`.
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Move the clock, backwards or forwards.
    pub fn set(&self, now: Timestamp) {
        *self.now.lock() = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.now.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_can_move_backwards() {
        let later = Timestamp::parse("2026-01-15T12:00:00Z").unwrap();
        let earlier = Timestamp::parse("2026-01-15T11:00:00Z").unwrap();
        let clock = FixedClock::new(later);
        assert_eq!(clock.now(), later);
        clock.set(earlier);
        assert_eq!(clock.now(), earlier);
    }

    #[test]
    fn system_clock_is_truncated() {
        let now = SystemClock.now();
        assert_eq!(now.as_datetime().timestamp_subsec_nanos(), 0);
    }
}
