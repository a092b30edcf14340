//! Clocks and repeating timers
//!
//! The engine never sleeps. It registers timers with a [`Scheduler`] and the
//! host loop asks the scheduler which ones are due.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::consts::MIN_TIMER_INTERVAL_MS;

/// Monotonic time source, measured from an arbitrary origin
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall-clock time since construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Virtual time that only moves when told to.
///
/// Clones share the same underlying time, so a test can keep one handle and
/// give the other to a scheduler.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Opaque handle to a registered timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Repeating-timer service
pub trait Scheduler {
    /// Register a timer that first fires one `interval` from now, then every
    /// `interval` after that.
    fn schedule_repeating(&mut self, interval: Duration) -> TimerId;

    /// Remove a timer. Once this returns, `poll_due` never yields `id` again.
    /// Returns false if the timer was unknown.
    fn cancel(&mut self, id: TimerId) -> bool;

    /// Next firing that is due, earliest deadline first. Each call yields at
    /// most one firing; a timer that is several intervals behind fires once
    /// per call until it catches up.
    fn poll_due(&mut self) -> Option<TimerId>;

    /// Time left until the earliest deadline, or `None` with no timers
    fn until_next_due(&self) -> Option<Duration>;
}

/// Convert a configured interval to a timer period.
///
/// Zero and negative intervals are clamped to `MIN_TIMER_INTERVAL_MS`.
pub fn interval_from_ms(ms: i64) -> Duration {
    Duration::from_millis(ms.max(MIN_TIMER_INTERVAL_MS as i64) as u64)
}

#[derive(Debug)]
struct Timer {
    id: TimerId,
    interval: Duration,
    next_due: Duration,
}

/// Deadline-based scheduler over any [`Clock`]
#[derive(Debug)]
pub struct IntervalScheduler<C> {
    clock: C,
    timers: Vec<Timer>,
    next_id: u64,
    fired: u64,
}

impl<C: Clock> IntervalScheduler<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            timers: Vec::new(),
            next_id: 1,
            fired: 0,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Number of registered timers
    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    /// Total firings handed out by `poll_due`
    pub fn fired(&self) -> u64 {
        self.fired
    }
}

impl<C: Clock> Scheduler for IntervalScheduler<C> {
    fn schedule_repeating(&mut self, interval: Duration) -> TimerId {
        let interval = interval.max(Duration::from_millis(MIN_TIMER_INTERVAL_MS));
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            interval,
            next_due: self.clock.now() + interval,
        });
        log::trace!("Timer {:?} scheduled every {:?}", id, interval);
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        before != self.timers.len()
    }

    fn poll_due(&mut self) -> Option<TimerId> {
        let now = self.clock.now();
        let timer = self
            .timers
            .iter_mut()
            .filter(|t| t.next_due <= now)
            .min_by_key(|t| (t.next_due, t.id.0))?;

        timer.next_due += timer.interval;
        self.fired += 1;
        Some(timer.id)
    }

    fn until_next_due(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.timers
            .iter()
            .map(|t| t.next_due.saturating_sub(now))
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_first_firing_after_one_interval() {
        let clock = ManualClock::new();
        let mut scheduler = IntervalScheduler::new(clock.clone());
        let id = scheduler.schedule_repeating(ms(10));

        assert_eq!(scheduler.poll_due(), None);
        clock.advance(ms(9));
        assert_eq!(scheduler.poll_due(), None);
        clock.advance(ms(1));
        assert_eq!(scheduler.poll_due(), Some(id));
        assert_eq!(scheduler.poll_due(), None);
    }

    #[test]
    fn test_catch_up_fires_once_per_interval() {
        let clock = ManualClock::new();
        let mut scheduler = IntervalScheduler::new(clock.clone());
        let id = scheduler.schedule_repeating(ms(10));

        clock.advance(ms(35));
        let mut fired = Vec::new();
        while let Some(t) = scheduler.poll_due() {
            fired.push(t);
        }
        assert_eq!(fired, vec![id, id, id]);
        assert_eq!(scheduler.fired(), 3);
        assert_eq!(scheduler.until_next_due(), Some(ms(5)));
    }

    #[test]
    fn test_cancel_is_immediate() {
        let clock = ManualClock::new();
        let mut scheduler = IntervalScheduler::new(clock.clone());
        let id = scheduler.schedule_repeating(ms(10));

        clock.advance(ms(100));
        assert_eq!(scheduler.poll_due(), Some(id));
        assert!(scheduler.cancel(id));
        assert_eq!(scheduler.poll_due(), None);
        assert!(!scheduler.cancel(id));
        assert_eq!(scheduler.until_next_due(), None);
        assert_eq!(scheduler.active_timers(), 0);
    }

    #[test]
    fn test_non_positive_interval_is_clamped() {
        assert_eq!(interval_from_ms(0), ms(1));
        assert_eq!(interval_from_ms(-250), ms(1));
        assert_eq!(interval_from_ms(1000), ms(1000));

        let clock = ManualClock::new();
        let mut scheduler = IntervalScheduler::new(clock.clone());
        let id = scheduler.schedule_repeating(Duration::ZERO);
        assert_eq!(scheduler.poll_due(), None);
        clock.advance(ms(1));
        assert_eq!(scheduler.poll_due(), Some(id));
    }

    #[test]
    fn test_earliest_deadline_first() {
        let clock = ManualClock::new();
        let mut scheduler = IntervalScheduler::new(clock.clone());
        let slow = scheduler.schedule_repeating(ms(30));
        let fast = scheduler.schedule_repeating(ms(20));

        clock.advance(ms(40));
        assert_eq!(scheduler.poll_due(), Some(fast));
        assert_eq!(scheduler.poll_due(), Some(slow));
        assert_eq!(scheduler.poll_due(), Some(fast));
        assert_eq!(scheduler.poll_due(), None);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::default();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
