//! Useless Progressbar - a progress bar that might start over at any moment
//!
//! Core modules:
//! - `sim`: Tick-driven game engine (state, tick rule, start/stop control)
//! - `platform`: Timers, clocks and terminal input parsing
//! - `settings`: JSON-backed configuration
//! - `ui`: Text rendering of engine notifications

pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod ui;

pub use error::{ConfigError, InputError, SettingsError};
pub use settings::Settings;
pub use sim::{Engine, GameConfig, GameEvent, GameState, Notification, Outcome};

/// Game configuration constants
pub mod consts {
    /// Progress needed to finish a run
    pub const DEFAULT_MAX: i64 = 100;
    /// Percent chance per tick that progress falls back to zero
    pub const DEFAULT_RATE: i64 = 5;
    /// Milliseconds between ticks
    pub const DEFAULT_TICK_INTERVAL_MS: i64 = 1000;

    /// Reset rolls are drawn uniformly from `0..RESET_ROLL_RANGE`
    pub const RESET_ROLL_RANGE: i64 = 100;

    /// Shortest interval a timer will actually fire at
    pub const MIN_TIMER_INTERVAL_MS: u64 = 1;

    /// Progress bar width in characters
    pub const DEFAULT_BAR_WIDTH: usize = 40;
}
