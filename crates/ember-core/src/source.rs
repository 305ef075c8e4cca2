//! Host time sources
//!
//! The runtime never reads the wall clock on its own; drivers are handed a
//! [`TimeSource`] and stamp every tick with it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::time::Timestamp;

/// A monotonic source of host timestamps.
pub trait TimeSource: Send + Sync {
    /// The current host time. Successive calls never go backwards.
    fn now(&self) -> Timestamp;
}

/// Reads `std::time::Instant`, measured from the moment the source was created.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTimeSource {
    origin: Instant,
}

impl MonotonicTimeSource {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTimeSource {
    fn now(&self) -> Timestamp {
        Timestamp::from_secs(self.origin.elapsed().as_secs_f64())
    }
}

/// A time source that only moves when told to. Used for tests and replays.
#[derive(Debug, Default)]
pub struct ManualTimeSource {
    /// `f64` milliseconds stored as raw bits.
    millis: AtomicU64,
}

impl ManualTimeSource {
    pub fn new(start: Timestamp) -> Self {
        Self {
            millis: AtomicU64::new(start.as_millis().to_bits()),
        }
    }

    /// Jump to an absolute timestamp.
    pub fn set(&self, now: Timestamp) {
        self.millis.store(now.as_millis().to_bits(), Ordering::Release);
    }

    /// Move forward by `millis` and return the new time.
    pub fn advance(&self, millis: f64) -> Timestamp {
        let next = self.now().offset(millis);
        self.set(next);
        next
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Timestamp {
        Timestamp::from_millis(f64::from_bits(self.millis.load(Ordering::Acquire)))
    }
}
