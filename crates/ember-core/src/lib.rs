//! Ember Core - Time keeping for the Ember runtime
//!
//! This crate provides the pieces every other Ember crate builds on:
//! - Millisecond timestamps read from an injected host time source
//! - The simulation clock (per-tick delta and cumulative elapsed time)
//! - Time configuration (scaling, delta clamping)

pub mod source;
pub mod time;

pub use source::{ManualTimeSource, MonotonicTimeSource, TimeSource};
pub use time::{Clock, TimeConfig, Timestamp};
