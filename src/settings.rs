//! Startup settings
//!
//! Read once from an optional JSON file. Missing fields fall back to the
//! defaults in `consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::SettingsError;
use crate::consts::*;
use crate::sim::GameConfig;

/// Settings/preferences for a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Game ===
    /// Progress needed to finish a run
    pub max: i64,
    /// Percent chance per tick of resetting to zero
    pub rate: i64,
    /// Milliseconds between ticks
    pub tick_interval_ms: i64,

    // === Display ===
    /// Progress bar width in characters
    pub bar_width: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max: DEFAULT_MAX,
            rate: DEFAULT_RATE,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            bar_width: DEFAULT_BAR_WIDTH,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Starting configuration for the engine
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            max: self.max,
            rate: self.rate,
            tick_interval_ms: self.tick_interval_ms,
        }
    }
}
