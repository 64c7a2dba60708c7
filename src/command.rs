//! Line commands accepted by the terminal front-end.

use std::fmt;

use crate::engine::{Clock, PayCounter};
use crate::types::Mode;

pub const HELP: &str =
    "commands: start | stop | toggle | reset | hourly | yearly | rate <n> | currency <GBP|EUR|USD> | status | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Toggle,
    Reset,
    Mode(Mode),
    Rate(String),
    Currency(String),
    Status,
    Help,
    Quit,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Start => write!(f, "start"),
            Command::Stop => write!(f, "stop"),
            Command::Toggle => write!(f, "toggle"),
            Command::Reset => write!(f, "reset"),
            Command::Mode(m) => write!(f, "{m}"),
            Command::Rate(text) => write!(f, "rate {text}"),
            Command::Currency(code) => write!(f, "currency {code}"),
            Command::Status => write!(f, "status"),
            Command::Help => write!(f, "help"),
            Command::Quit => write!(f, "quit"),
        }
    }
}

impl std::str::FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };
        let cmd = match word.to_lowercase().as_str() {
            "start" => Command::Start,
            "stop" => Command::Stop,
            "toggle" | "" => Command::Toggle,
            "reset" => Command::Reset,
            "hourly" | "yearly" => Command::Mode(word.parse()?),
            // An empty rate is allowed: it clears the input.
            "rate" | "salary" => Command::Rate(rest.to_string()),
            "currency" if !rest.is_empty() => Command::Currency(rest.to_string()),
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => anyhow::bail!("Unknown command: {line}"),
        };
        Ok(cmd)
    }
}

/// What the front-end should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// Print this message on its own line.
    Say(String),
    Exit,
}

/// Apply a command to the session.
pub fn apply<C: Clock>(counter: &mut PayCounter<C>, cmd: Command) -> Outcome {
    match cmd {
        Command::Start => match counter.start() {
            Ok(()) => Outcome::Continue,
            Err(e) => Outcome::Say(e.to_string()),
        },
        Command::Stop => {
            counter.stop();
            Outcome::Continue
        }
        Command::Toggle => match counter.toggle() {
            Ok(()) => Outcome::Continue,
            Err(e) => Outcome::Say(e.to_string()),
        },
        Command::Reset => {
            counter.reset();
            Outcome::Continue
        }
        Command::Mode(mode) => {
            counter.switch_mode(mode);
            Outcome::Continue
        }
        Command::Rate(text) => {
            if counter.set_input(&text) {
                Outcome::Continue
            } else {
                Outcome::Say("Stop the counter before changing the rate".to_string())
            }
        }
        Command::Currency(code) => {
            if counter.select_currency(&code) {
                Outcome::Continue
            } else {
                Outcome::Say(format!("Currency not changed: {code}"))
            }
        }
        Command::Status => Outcome::Say(crate::display::detail(&counter.snapshot())),
        Command::Help => Outcome::Say(HELP.to_string()),
        Command::Quit => Outcome::Exit,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
