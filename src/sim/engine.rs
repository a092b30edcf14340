//! Game engine
//!
//! Owns the [`GameState`], the reset RNG and the only timer handle. All
//! mutation goes through the methods here, and every mutation is followed by
//! a [`Notification`] to each observer, in order.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{GameConfig, GameEvent, GameState, Notification};
use super::tick::{TickOutcome, tick};
use crate::consts::RESET_ROLL_RANGE;
use crate::platform::{Intent, Scheduler, TimerId, interval_from_ms};

/// Whether a command changed anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// Not allowed in the current phase, or nothing to do
    Ignored,
}

type Observer = Box<dyn FnMut(&Notification)>;

pub struct Engine<S> {
    state: GameState,
    seed: u64,
    rng: Pcg32,
    scheduler: S,
    timer: Option<TimerId>,
    observers: Vec<Observer>,
}

impl<S: Scheduler> Engine<S> {
    /// Default configuration, random seed
    pub fn new(scheduler: S) -> Self {
        Self::with_seed(scheduler, rand::random())
    }

    pub fn with_seed(scheduler: S, seed: u64) -> Self {
        Self::with_config(scheduler, GameConfig::default(), seed)
    }

    pub fn with_config(scheduler: S, config: GameConfig, seed: u64) -> Self {
        log::debug!("Engine created with seed {} and {:?}", seed, config);
        Self {
            state: GameState::from_config(config),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            scheduler,
            timer: None,
            observers: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Handle of the timer driving the current run
    pub fn active_timer(&self) -> Option<TimerId> {
        self.timer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Register an observer. It sees every notification from now on.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&Notification) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Begin a run: progress back to zero and a fresh repeating timer.
    pub fn start(&mut self) -> Outcome {
        if self.state.running {
            log::debug!("Start ignored: already running");
            return Outcome::Ignored;
        }

        self.state.progress = 0;
        self.state.running = true;
        let interval = interval_from_ms(self.state.tick_interval_ms);
        self.timer = Some(self.scheduler.schedule_repeating(interval));

        log::info!(
            "Run started (max {}, rate {}%, every {:?})",
            self.state.max,
            self.state.rate,
            interval
        );
        self.notify(GameEvent::Started);
        Outcome::Applied
    }

    /// End the run. Progress is kept for display until the next start.
    pub fn stop(&mut self) -> Outcome {
        self.finish(false)
    }

    pub fn set_rate(&mut self, rate: i64) -> Outcome {
        self.configure("rate", |state| state.rate = rate)
    }

    pub fn set_max(&mut self, max: i64) -> Outcome {
        self.configure("max", |state| state.max = max)
    }

    pub fn set_tick_interval_ms(&mut self, ms: i64) -> Outcome {
        self.configure("tick interval", |state| state.tick_interval_ms = ms)
    }

    /// Dispatch a user intent. Front-end-only intents are ignored.
    pub fn apply(&mut self, intent: Intent) -> Outcome {
        match intent {
            Intent::Start => self.start(),
            Intent::Stop => self.stop(),
            Intent::SetRate(rate) => self.set_rate(rate),
            Intent::SetMax(max) => self.set_max(max),
            Intent::SetTickIntervalMs(ms) => self.set_tick_interval_ms(ms),
            Intent::Status | Intent::Help | Intent::Quit => Outcome::Ignored,
        }
    }

    /// Apply one tick for a timer firing.
    ///
    /// Firings from anything but the active timer are dropped. Returns true
    /// if the tick rule ran.
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        if !self.state.running || self.timer != Some(id) {
            log::trace!("Dropping stale firing from {:?}", id);
            return false;
        }

        let roll = self.rng.random_range(0..RESET_ROLL_RANGE);
        match tick(&mut self.state, roll) {
            TickOutcome::Completed => {
                self.finish(true);
            }
            outcome => {
                if outcome == TickOutcome::Reset {
                    log::debug!("Rolled {} under rate {}: progress reset", roll, self.state.rate);
                }
                self.notify(GameEvent::Ticked(outcome));
                if self.state.is_complete() {
                    self.finish(true);
                }
            }
        }
        true
    }

    /// Run every firing the scheduler has due. Returns the number of ticks
    /// applied.
    pub fn run_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Some(id) = self.scheduler.poll_due() {
            if self.on_timer(id) {
                applied += 1;
            }
        }
        applied
    }

    fn finish(&mut self, completed: bool) -> Outcome {
        if !self.state.running {
            return Outcome::Ignored;
        }

        if let Some(id) = self.timer.take() {
            self.scheduler.cancel(id);
        }
        self.state.running = false;

        if completed {
            log::info!("Run complete at {}/{}", self.state.progress, self.state.max);
        } else {
            log::info!("Run stopped at {}/{}", self.state.progress, self.state.max);
        }
        self.notify(GameEvent::Stopped { completed });
        Outcome::Applied
    }

    fn configure(&mut self, field: &str, update: impl FnOnce(&mut GameState)) -> Outcome {
        if self.state.running {
            log::debug!("Ignoring {} change while running", field);
            return Outcome::Ignored;
        }

        update(&mut self.state);
        self.notify(GameEvent::ConfigChanged);
        Outcome::Applied
    }

    fn notify(&mut self, event: GameEvent) {
        let notification = Notification {
            event,
            state: self.state,
        };
        for observer in &mut self.observers {
            observer(&notification);
        }
    }
}
