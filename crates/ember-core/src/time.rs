//! Simulation clock for the Ember runtime
//!
//! Tracks the time elapsed since the previous tick and the cumulative time
//! elapsed since the clock was created.

use std::fmt;
use std::ops::Sub;

use serde::{Deserialize, Serialize};

/// A point in host time, in milliseconds since an arbitrary origin.
///
/// Timestamps come from a monotonic host source and are only meaningful
/// relative to each other.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Timestamp(f64);

impl Timestamp {
    /// The origin of the host time line.
    pub const ZERO: Self = Self(0.0);

    /// Create a timestamp from milliseconds.
    pub fn from_millis(millis: f64) -> Self {
        Self(millis)
    }

    /// Create a timestamp from seconds.
    pub fn from_secs(secs: f64) -> Self {
        Self(secs * 1000.0)
    }

    /// Milliseconds since the origin.
    pub fn as_millis(self) -> f64 {
        self.0
    }

    /// This timestamp moved forward by `millis`.
    pub fn offset(self, millis: f64) -> Self {
        Self(self.0 + millis)
    }
}

impl Sub for Timestamp {
    type Output = f64;

    /// Milliseconds between two timestamps.
    fn sub(self, rhs: Self) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}ms", self.0)
    }
}

/// Configuration for the simulation clock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// How many simulated milliseconds pass per host millisecond
    pub time_scale: f64,
    /// Upper bound for a single tick's raw delta, in milliseconds.
    /// `None` reports host deltas unclamped.
    pub max_delta_ms: Option<f64>,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            max_delta_ms: None,
        }
    }
}

/// Per-tick time tracking.
///
/// `delta` is the (scaled) time between the two most recent ticks and
/// `elapsed` the sum of every `delta` reported so far. The first tick always
/// reports a delta of zero.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    config: TimeConfig,
    delta: f64,
    elapsed: f64,
    previous: Option<Timestamp>,
    ticks: u64,
    paused: bool,
}

impl Clock {
    /// Create a clock with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Advance the clock to `now`.
    ///
    /// A backwards step is reported as a zero delta and the latest timestamp
    /// seen is kept, so host time is never counted twice.
    pub fn tick(&mut self, now: Timestamp) {
        let raw = match self.previous {
            Some(previous) => (now - previous).max(0.0),
            None => 0.0,
        };
        self.previous = Some(match self.previous {
            Some(previous) if previous > now => previous,
            _ => now,
        });
        self.ticks += 1;

        if self.paused {
            self.delta = 0.0;
            return;
        }

        let clamped = match self.config.max_delta_ms {
            Some(max) => raw.min(max),
            None => raw,
        };
        self.delta = clamped * self.config.time_scale;
        self.elapsed += self.delta;
    }

    /// Milliseconds between the two most recent ticks.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Sum of every delta reported since creation.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of ticks processed.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Latest timestamp the clock has been ticked with.
    pub fn previous(&self) -> Option<Timestamp> {
        self.previous
    }

    pub fn config(&self) -> &TimeConfig {
        &self.config
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the clock. Paused ticks report a zero delta.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume the clock
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Set the time scale (0.0 = frozen, 1.0 = normal, 2.0 = double speed)
    pub fn set_time_scale(&mut self, scale: f64) {
        self.config.time_scale = scale.max(0.0);
    }
}
