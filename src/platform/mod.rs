//! Platform abstraction layer
//!
//! Handles the host side of the engine:
//! - Time and repeating timers
//! - Terminal input parsing

pub mod input;
pub mod time;

pub use input::{Intent, parse_intent};
pub use time::{
    Clock, IntervalScheduler, ManualClock, Scheduler, SystemClock, TimerId, interval_from_ms,
};
