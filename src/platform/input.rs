//! Terminal command parsing
//!
//! Turns a line of user input into an [`Intent`]. Anything that is not a
//! whole number is rejected here and never reaches the engine.

use crate::InputError;

/// What the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Start,
    Stop,
    SetRate(i64),
    SetMax(i64),
    SetTickIntervalMs(i64),
    /// Print the current state
    Status,
    Help,
    Quit,
}

impl Intent {
    /// True for intents that change `max`, `rate` or the tick interval
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Intent::SetRate(_) | Intent::SetMax(_) | Intent::SetTickIntervalMs(_)
        )
    }
}

pub const HELP: &str = "\
commands:
  start            begin a run (progress resets to 0)
  stop | end       end the current run
  rate <n>         percent chance per tick of resetting to 0
  max <n>          progress needed to finish
  time <n>         milliseconds between ticks (alias: interval)
  status           show the current state
  help             show this message
  quit | exit      leave";

pub fn parse_intent(line: &str) -> Result<Intent, InputError> {
    let mut words = line.split_whitespace();
    let command = words.next().ok_or(InputError::Empty)?.to_lowercase();
    let arg = words.next();

    if words.next().is_some() {
        return Err(InputError::TooManyArguments(command));
    }

    let simple = |intent: Intent| match arg {
        Some(_) => Err(InputError::UnexpectedArgument(command.clone())),
        None => Ok(intent),
    };

    match command.as_str() {
        "start" => simple(Intent::Start),
        "stop" | "end" => simple(Intent::Stop),
        "status" => simple(Intent::Status),
        "help" | "?" => simple(Intent::Help),
        "quit" | "exit" => simple(Intent::Quit),
        "rate" => parse_number(&command, arg).map(Intent::SetRate),
        "max" => parse_number(&command, arg).map(Intent::SetMax),
        "time" | "interval" => parse_number(&command, arg).map(Intent::SetTickIntervalMs),
        _ => Err(InputError::UnknownCommand(command.clone())),
    }
}

fn parse_number(command: &str, arg: Option<&str>) -> Result<i64, InputError> {
    let value = arg.ok_or_else(|| InputError::MissingValue(command.to_string()))?;
    value.parse::<i64>().map_err(|_| InputError::NotANumber {
        command: command.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_controls() {
        assert_eq!(parse_intent("start"), Ok(Intent::Start));
        assert_eq!(parse_intent("  STOP "), Ok(Intent::Stop));
        assert_eq!(parse_intent("end"), Ok(Intent::Stop));
        assert_eq!(parse_intent("exit"), Ok(Intent::Quit));
        assert_eq!(parse_intent("?"), Ok(Intent::Help));
    }

    #[test]
    fn test_parse_config() {
        assert_eq!(parse_intent("rate 20"), Ok(Intent::SetRate(20)));
        assert_eq!(parse_intent("max -3"), Ok(Intent::SetMax(-3)));
        assert_eq!(parse_intent("time 250"), Ok(Intent::SetTickIntervalMs(250)));
        assert_eq!(parse_intent("interval 0"), Ok(Intent::SetTickIntervalMs(0)));
        assert!(Intent::SetMax(1).is_config());
        assert!(!Intent::Start.is_config());
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(parse_intent("   "), Err(InputError::Empty));
        assert_eq!(
            parse_intent("jump"),
            Err(InputError::UnknownCommand("jump".to_string()))
        );
        assert_eq!(
            parse_intent("rate"),
            Err(InputError::MissingValue("rate".to_string()))
        );
        assert_eq!(
            parse_intent("max ten"),
            Err(InputError::NotANumber {
                command: "max".to_string(),
                value: "ten".to_string(),
            })
        );
        assert_eq!(
            parse_intent("rate 2.5"),
            Err(InputError::NotANumber {
                command: "rate".to_string(),
                value: "2.5".to_string(),
            })
        );
        assert_eq!(
            parse_intent("start now"),
            Err(InputError::UnexpectedArgument("start".to_string()))
        );
        assert_eq!(
            parse_intent("max 5 6"),
            Err(InputError::TooManyArguments("max".to_string()))
        );
    }
}
