//! Monotonic time sources.

use std::cell::Cell;
use std::time::Instant;

/// Nanoseconds per second.
pub const NANOS_PER_SEC: u64 = 1_000_000_000;

/// A monotonic nanosecond clock.
///
/// Implementations must never return a value lower than a previous call
/// made on the same clock.
pub trait TimeSource {
    /// Current timestamp in nanoseconds.
    fn now_ns(&self) -> u64;
}

/// Wall clock backed by [`std::time::Instant`].
///
/// Create one per process and hand it to the root group; timestamps are
/// relative to the moment of construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    anchor: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            anchor: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    #[inline(always)]
    fn now_ns(&self) -> u64 {
        self.anchor.elapsed().as_nanos() as u64
    }
}

/// Clock that only moves when told to.
///
/// Useful for deterministic tests: a candidate can call [`ManualClock::advance`]
/// to "take" exactly as long as it wants.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `nanos`.
    pub fn advance(&self, nanos: u64) {
        self.now.set(self.now.get().saturating_add(nanos));
    }

    /// Jump to an absolute timestamp. Earlier timestamps are ignored.
    pub fn set(&self, nanos: u64) {
        if nanos > self.now.get() {
            self.now.set(nanos);
        }
    }
}

impl TimeSource for ManualClock {
    fn now_ns(&self) -> u64 {
        self.now.get()
    }
}
