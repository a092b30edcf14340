//! Game state and core simulation types
//!
//! Everything an observer can see about a run lives here.

use serde::{Deserialize, Serialize};

use super::tick::TickOutcome;
use crate::ConfigError;
use crate::consts::*;

/// Current phase of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No timer registered; configuration may change
    Idle,
    /// A run is in progress
    Active,
}

/// Tunable parameters of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub max: i64,
    pub rate: i64,
    pub tick_interval_ms: i64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max: DEFAULT_MAX,
            rate: DEFAULT_RATE,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    /// Report every degenerate value, in field order.
    ///
    /// Nothing here is enforced by the engine.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut problems = Vec::new();
        if self.max <= 0 {
            problems.push(ConfigError::NonPositiveMax(self.max));
        }
        if !(0..=RESET_ROLL_RANGE).contains(&self.rate) {
            problems.push(ConfigError::RateOutOfRange(self.rate));
        }
        if self.tick_interval_ms <= 0 {
            problems.push(ConfigError::NonPositiveInterval(self.tick_interval_ms));
        }
        problems
    }
}

/// Complete game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Current advancement (never negative)
    pub progress: i64,
    /// Threshold that ends a run
    pub max: i64,
    /// Percent chance per tick of falling back to zero
    pub rate: i64,
    /// Milliseconds between ticks
    pub tick_interval_ms: i64,
    /// Whether a tick timer is active
    pub running: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::from_config(GameConfig::default())
    }
}

impl GameState {
    pub fn from_config(config: GameConfig) -> Self {
        Self {
            progress: 0,
            max: config.max,
            rate: config.rate,
            tick_interval_ms: config.tick_interval_ms,
            running: false,
        }
    }

    pub fn config(&self) -> GameConfig {
        GameConfig {
            max: self.max,
            rate: self.rate,
            tick_interval_ms: self.tick_interval_ms,
        }
    }

    pub fn phase(&self) -> GamePhase {
        if self.running {
            GamePhase::Active
        } else {
            GamePhase::Idle
        }
    }

    /// True once progress has reached the target
    pub fn is_complete(&self) -> bool {
        self.progress >= self.max
    }

    /// Progress as a proportion of `max`, clamped to `[0, 1]`
    pub fn fraction(&self) -> f64 {
        if self.max <= 0 {
            return 1.0;
        }
        (self.progress as f64 / self.max as f64).clamp(0.0, 1.0)
    }
}

/// What caused a state change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A run began; progress is back at zero
    Started,
    /// One tick was applied
    Ticked(TickOutcome),
    /// The run ended, either by request or because progress reached `max`
    Stopped { completed: bool },
    /// `max`, `rate` or the tick interval changed while idle
    ConfigChanged,
}

/// Delivered to observers after every mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub event: GameEvent,
    pub state: GameState,
}
