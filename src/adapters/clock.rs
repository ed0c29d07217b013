//! Clock adapters.

use chrono::Utc;

use crate::ports::clock_port::Clock;

/// Wall-clock seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&mut self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Monotonic counter, one step per call. Used for reproducible runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickCounter {
    next: i64,
}

impl TickCounter {
    /// The first call to `now` returns `start`.
    pub fn starting_at(start: i64) -> Self {
        TickCounter { next: start }
    }
}

impl Clock for TickCounter {
    fn now(&mut self) -> i64 {
        let current = self.next;
        self.next += 1;
        current
    }
}
