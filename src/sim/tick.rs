//! Per-tick update rule
//!
//! Pure function of the state and one reset roll, so the rule can be tested
//! without a timer or an RNG.

use serde::{Deserialize, Serialize};

use super::state::GameState;

/// Result of applying the tick rule once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Progress grew by one
    Advanced,
    /// The roll landed under `rate`; progress is back at zero
    Reset,
    /// Progress was already at `max`; nothing changed and the run must end
    Completed,
}

/// Advance the state by one tick.
///
/// `roll` is a uniform draw from `0..RESET_ROLL_RANGE`. The caller is
/// responsible for stopping the run when this returns `Completed` or leaves
/// the state complete.
pub fn tick(state: &mut GameState, roll: i64) -> TickOutcome {
    if state.progress >= state.max {
        return TickOutcome::Completed;
    }

    if roll < state.rate {
        state.progress = 0;
        TickOutcome::Reset
    } else {
        state.progress += 1;
        TickOutcome::Advanced
    }
}
