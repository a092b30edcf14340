use thiserror::Error;

/// Degenerate configuration values.
///
/// The engine accepts these as given; callers decide whether to warn or refuse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max must be positive (got {0}); a run would end on its first tick")]
    NonPositiveMax(i64),
    #[error("rate must be between 0 and 100 (got {0})")]
    RateOutOfRange(i64),
    #[error("tick interval must be positive (got {0} ms)")]
    NonPositiveInterval(i64),
}

/// Terminal input that could not be turned into an intent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}` (try `help`)")]
    UnknownCommand(String),
    #[error("`{0}` needs a numeric argument")]
    MissingValue(String),
    #[error("`{value}` is not a whole number (for `{command}`)")]
    NotANumber { command: String, value: String },
    #[error("`{0}` takes no arguments")]
    UnexpectedArgument(String),
    #[error("too many arguments for `{0}`")]
    TooManyArguments(String),
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("could not read settings file")]
    Io(#[from] std::io::Error),
    #[error("settings file is not valid JSON")]
    Parse(#[from] serde_json::Error),
}
