//! Game simulation module
//!
//! All game logic lives here:
//! - One owned state struct, mutated only by the engine
//! - Pure tick rule, fed one reset roll per tick
//! - Timers come from a `platform::Scheduler`, never from threads or sleeps

pub mod engine;
pub mod state;
pub mod tick;

pub use engine::{Engine, Outcome};
pub use state::{GameConfig, GameEvent, GamePhase, GameState, Notification};
pub use tick::{TickOutcome, tick};
