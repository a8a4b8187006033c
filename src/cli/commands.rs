//! Command definitions for the interval clock CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::types::{ClockConfig, DEFAULT_BREAK_MINUTES, DEFAULT_SESSION_MINUTES};

// ============================================================================
// CLI Structure
// ============================================================================

/// Interval clock CLI - a 25 + 5 session/break timer
#[derive(Parser, Debug)]
#[command(
    name = "interval-clock",
    version,
    about = "A 25 + 5 session/break clock for the terminal",
    long_about = "Counts down a work session, beeps, counts down a break, and repeats.\n\
                  Control it by typing commands (start, stop, reset, session+, break-, ...) \
                  followed by Enter.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the clock and read controls from stdin
    Run(RunArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// How state changes are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One human-readable line per change
    Text,
    /// One JSON object per change
    Json,
}

/// Arguments for the run command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Session length in minutes (1-60)
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_SESSION_MINUTES,
        value_parser = clap::value_parser!(u32).range(1..=60)
    )]
    pub session: u32,

    /// Break length in minutes (1-60)
    #[arg(
        short,
        long = "break",
        default_value_t = DEFAULT_BREAK_MINUTES,
        value_parser = clap::value_parser!(u32).range(1..=60)
    )]
    pub break_minutes: u32,

    /// Audio file played at every session/break switch
    #[arg(short, long, value_name = "PATH")]
    pub cue: Option<PathBuf>,

    /// Disable the switch cue
    #[arg(long)]
    pub no_sound: bool,

    /// Print state changes as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Start counting down immediately
    #[arg(short, long)]
    pub autostart: bool,
}

impl RunArgs {
    /// Initial lengths requested on the command line.
    pub fn clock_config(&self) -> ClockConfig {
        ClockConfig::new(self.session, self.break_minutes)
    }

    /// Requested output format.
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            session: DEFAULT_SESSION_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
            cue: None,
            no_sound: false,
            json: false,
            autostart: false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
