//! Useless Progressbar entry point
//!
//! Runs an interactive terminal session, or a virtual-time run with
//! `--headless <ticks>` that prints every notification as JSON.

use std::error::Error;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::thread;

use crossbeam_channel::{Receiver, RecvTimeoutError};

use useless_progressbar::platform::input::HELP;
use useless_progressbar::platform::{
    Intent, IntervalScheduler, ManualClock, Scheduler, SystemClock, interval_from_ms,
    parse_intent,
};
use useless_progressbar::ui::{Controls, TerminalView, render_bar};
use useless_progressbar::{Engine, Outcome, Settings};

const USAGE: &str = "usage: useless-progressbar [--config <file.json>] [--seed <n>] [--headless <ticks>]";

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    seed: Option<u64>,
    headless: Option<u64>,
}

fn parse_args() -> Result<Args, Box<dyn Error>> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = || iter.next().ok_or_else(|| format!("{} needs a value\n{}", flag, USAGE));
        match flag.as_str() {
            "--config" => args.config = Some(PathBuf::from(value()?)),
            "--seed" => args.seed = Some(value()?.parse()?),
            "--headless" => args.headless = Some(value()?.parse()?),
            "-h" | "--help" => {
                println!("{}\n\n{}", USAGE, HELP);
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument `{}`\n{}", other, USAGE).into()),
        }
    }
    Ok(args)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = parse_args()?;
    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    for problem in settings.game_config().validate() {
        log::warn!("Accepting degenerate setting: {}", problem);
    }

    let seed = args.seed.unwrap_or_else(rand::random::<u64>);
    log::info!("Useless Progressbar starting with seed {}", seed);

    match args.headless {
        Some(ticks) => run_headless(&settings, seed, ticks),
        None => run_interactive(&settings, seed),
    }
}

/// Drive a run on virtual time, printing notifications as JSON lines
fn run_headless(settings: &Settings, seed: u64, ticks: u64) -> Result<(), Box<dyn Error>> {
    let clock = ManualClock::new();
    let scheduler = IntervalScheduler::new(clock.clone());
    let mut engine = Engine::with_config(scheduler, settings.game_config(), seed);
    engine.subscribe(|n| match serde_json::to_string(n) {
        Ok(json) => println!("{}", json),
        Err(e) => log::warn!("Could not encode notification: {}", e),
    });

    engine.start();
    let step = interval_from_ms(settings.tick_interval_ms);
    let mut applied = 0;
    while engine.is_running() && applied < ticks {
        clock.advance(step);
        applied += engine.run_pending() as u64;
    }
    if engine.stop() == Outcome::Applied {
        log::info!("Tick budget of {} used up before completion", ticks);
    }
    Ok(())
}

fn run_interactive(settings: &Settings, seed: u64) -> Result<(), Box<dyn Error>> {
    let scheduler = IntervalScheduler::new(SystemClock::default());
    let mut engine = Engine::with_config(scheduler, settings.game_config(), seed);

    let mut view = TerminalView::new(io::stdout(), settings.bar_width);
    engine.subscribe(move |n| {
        if let Err(e) = view.render(n) {
            log::warn!("Could not draw: {}", e);
        }
    });

    println!("Useless Progressbar - really useless\n{}", HELP);
    let lines = spawn_stdin_reader();

    loop {
        let received = match engine.scheduler().until_next_due() {
            Some(wait) => lines.recv_timeout(wait),
            None => lines.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match received {
            Ok(line) => {
                if !handle_line(&mut engine, &line, settings.bar_width) {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                log::info!("Input closed");
                break;
            }
        }
        engine.run_pending();
    }

    engine.stop();
    Ok(())
}

/// Forward stdin lines to the main loop so ticks and input never overlap
fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = crossbeam_channel::unbounded();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Returns false when the user asked to quit
fn handle_line<S: Scheduler>(engine: &mut Engine<S>, line: &str, bar_width: usize) -> bool {
    if line.trim().is_empty() {
        return true;
    }

    let intent = match parse_intent(line) {
        Ok(intent) => intent,
        Err(e) => {
            println!("{}", e);
            return true;
        }
    };

    match intent {
        Intent::Quit => return false,
        Intent::Help => println!("{}", HELP),
        Intent::Status => {
            let state = engine.state();
            println!(
                "{}  rate {}%, every {} ms",
                render_bar(state, bar_width),
                state.rate,
                state.tick_interval_ms
            );
            println!("available: {}", Controls::from_state(state).describe());
        }
        intent => {
            let controls = Controls::from_state(engine.state());
            if !controls.allows(&intent) {
                println!("not available now (available: {})", controls.describe());
            } else if engine.apply(intent) == Outcome::Ignored {
                log::debug!("{:?} had no effect", intent);
            }
        }
    }
    true
}
