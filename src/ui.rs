//! Text front-end
//!
//! Renders engine notifications as progress-bar lines and decides which
//! controls are currently usable.

use std::io::{self, Write};

use crate::platform::Intent;
use crate::sim::{GameEvent, GameState, Notification, TickOutcome};

/// Shown once progress reaches `max`
pub const COMPLETION_MESSAGE: &str = "congratulations!";

/// Which controls the user may touch right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub start: bool,
    pub stop: bool,
    /// `rate`, `max` and tick interval inputs
    pub config: bool,
}

impl Controls {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            start: !state.running,
            stop: state.running,
            config: !state.running,
        }
    }

    /// False for intents whose control is disabled
    pub fn allows(&self, intent: &Intent) -> bool {
        match intent {
            Intent::Start => self.start,
            Intent::Stop => self.stop,
            i if i.is_config() => self.config,
            _ => true,
        }
    }

    /// Comma-separated list of enabled commands
    pub fn describe(&self) -> String {
        let mut enabled = Vec::new();
        if self.start {
            enabled.push("start");
        }
        if self.stop {
            enabled.push("stop");
        }
        if self.config {
            enabled.extend(["rate", "max", "time"]);
        }
        enabled.join(", ")
    }
}

/// `[#####-----] 50/100 (50%)`, plus the completion message when done
pub fn render_bar(state: &GameState, width: usize) -> String {
    let fraction = state.fraction();
    let filled = ((fraction * width as f64).round() as usize).min(width);
    let mut line = format!(
        "[{}{}] {}/{} ({:.0}%)",
        "#".repeat(filled),
        "-".repeat(width - filled),
        state.progress,
        state.max,
        fraction * 100.0
    );
    if state.is_complete() {
        line.push(' ');
        line.push_str(COMPLETION_MESSAGE);
    }
    line
}

fn event_label(event: &GameEvent) -> &'static str {
    match event {
        GameEvent::Started => "start",
        GameEvent::Ticked(TickOutcome::Advanced) => "tick",
        GameEvent::Ticked(TickOutcome::Reset) => "reset",
        GameEvent::Ticked(TickOutcome::Completed) => "done",
        GameEvent::Stopped { completed: true } => "done",
        GameEvent::Stopped { completed: false } => "stop",
        GameEvent::ConfigChanged => "config",
    }
}

/// One display line for a notification
pub fn describe(notification: &Notification, width: usize) -> String {
    let state = &notification.state;
    match notification.event {
        GameEvent::ConfigChanged => format!(
            "{:>6}  max {}, rate {}%, every {} ms",
            event_label(&notification.event),
            state.max,
            state.rate,
            state.tick_interval_ms
        ),
        _ => format!(
            "{:>6}  {}",
            event_label(&notification.event),
            render_bar(state, width)
        ),
    }
}

/// Writes a line per notification, and the control hint after a run ends
pub struct TerminalView<W> {
    out: W,
    bar_width: usize,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, bar_width: usize) -> Self {
        Self { out, bar_width }
    }

    pub fn render(&mut self, notification: &Notification) -> io::Result<()> {
        writeln!(self.out, "{}", describe(notification, self.bar_width))?;
        if let GameEvent::Stopped { .. } = notification.event {
            let controls = Controls::from_state(&notification.state);
            writeln!(self.out, "        available: {}", controls.describe())?;
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(progress: i64, max: i64, running: bool) -> GameState {
        GameState {
            progress,
            max,
            rate: 5,
            tick_interval_ms: 1000,
            running,
        }
    }

    #[test]
    fn test_controls_follow_running() {
        let idle = Controls::from_state(&state(0, 100, false));
        assert!(idle.start && idle.config && !idle.stop);
        assert!(idle.allows(&Intent::SetMax(5)));
        assert!(!idle.allows(&Intent::Stop));
        assert_eq!(idle.describe(), "start, rate, max, time");

        let active = Controls::from_state(&state(3, 100, true));
        assert!(!active.start && !active.config && active.stop);
        assert!(!active.allows(&Intent::SetRate(1)));
        assert!(!active.allows(&Intent::Start));
        assert!(active.allows(&Intent::Stop));
        assert!(active.allows(&Intent::Status));
        assert_eq!(active.describe(), "stop");
    }

    #[test]
    fn test_render_bar() {
        assert_eq!(
            render_bar(&state(5, 10, true), 10),
            "[#####-----] 5/10 (50%)"
        );
        assert_eq!(render_bar(&state(0, 10, true), 4), "[----] 0/10 (0%)");
        assert_eq!(
            render_bar(&state(10, 10, false), 4),
            "[####] 10/10 (100%) congratulations!"
        );
    }

    #[test]
    fn test_render_bar_degenerate_max() {
        assert_eq!(
            render_bar(&state(0, -2, false), 4),
            "[####] 0/-2 (100%) congratulations!"
        );
    }

    #[test]
    fn test_view_writes_lines() {
        let mut view = TerminalView::new(Vec::new(), 4);
        view.render(&Notification {
            event: GameEvent::Ticked(TickOutcome::Reset),
            state: state(0, 4, true),
        })
        .unwrap();
        view.render(&Notification {
            event: GameEvent::Stopped { completed: true },
            state: state(4, 4, false),
        })
        .unwrap();
        view.render(&Notification {
            event: GameEvent::ConfigChanged,
            state: state(4, 8, false),
        })
        .unwrap();

        let text = String::from_utf8(view.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                " reset  [----] 0/4 (0%)",
                "  done  [####] 4/4 (100%) congratulations!",
                "        available: start, rate, max, time",
                "config  max 8, rate 5%, every 1000 ms",
            ]
        );
    }
}
