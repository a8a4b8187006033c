//! Line-oriented controls for a running clock.
//!
//! Each line read from the input is one [`ControlCommand`]. An empty line
//! toggles the clock, like the single start/stop button of a clock face.

use std::str::FromStr;

use anyhow::{Context, Result};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::clock::TimerEngine;

use super::commands::OutputFormat;
use super::display::Display;

/// A single control typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    Start,
    Stop,
    Toggle,
    Reset,
    IncrementSession,
    DecrementSession,
    IncrementBreak,
    DecrementBreak,
    Status,
    Help,
    Quit,
}

/// Input that does not name a control.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown command '{0}' (type 'help' for the list)")]
pub struct UnknownCommand(pub String);

impl FromStr for ControlCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let command = match s.trim().to_ascii_lowercase().as_str() {
            "" | "t" | "toggle" => ControlCommand::Toggle,
            "start" | "go" => ControlCommand::Start,
            "stop" | "pause" | "p" => ControlCommand::Stop,
            "reset" | "r" => ControlCommand::Reset,
            "session+" | "s+" => ControlCommand::IncrementSession,
            "session-" | "s-" => ControlCommand::DecrementSession,
            "break+" | "b+" => ControlCommand::IncrementBreak,
            "break-" | "b-" => ControlCommand::DecrementBreak,
            "status" | "?" => ControlCommand::Status,
            "help" | "h" => ControlCommand::Help,
            "quit" | "exit" | "q" => ControlCommand::Quit,
            _ => return Err(UnknownCommand(s.trim().to_string())),
        };
        Ok(command)
    }
}

/// Whether the control loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl ControlCommand {
    /// Applies this control to `engine`.
    pub fn apply(self, engine: &TimerEngine, format: OutputFormat) -> Flow {
        debug!(command = ?self, "Applying control");
        match self {
            ControlCommand::Start => engine.start(),
            ControlCommand::Stop => engine.stop(),
            ControlCommand::Toggle => engine.toggle(),
            ControlCommand::Reset => engine.reset(),
            ControlCommand::IncrementSession => {
                engine.increment_session();
            }
            ControlCommand::DecrementSession => {
                engine.decrement_session();
            }
            ControlCommand::IncrementBreak => {
                engine.increment_break();
            }
            ControlCommand::DecrementBreak => {
                engine.decrement_break();
            }
            ControlCommand::Status => Display::render(&engine.snapshot(), format),
            ControlCommand::Help => Display::show_help(),
            ControlCommand::Quit => return Flow::Quit,
        }
        Flow::Continue
    }
}

/// Reads controls from `input` until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if reading the input fails.
pub async fn run_controls<R>(engine: &TimerEngine, input: R, format: OutputFormat) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read control input")?
    {
        match line.parse::<ControlCommand>() {
            Ok(command) => {
                if command.apply(engine, format) == Flow::Quit {
                    break;
                }
            }
            Err(e) => Display::show_error(&e.to_string()),
        }
    }

    Ok(())
}
