//! Display utilities for the interval clock CLI.
//!
//! This module provides formatted output for:
//! - State change lines (text or JSON)
//! - Mode switch banners
//! - Help and error messages

use crate::types::{Mode, Snapshot};

use super::commands::OutputFormat;

// ============================================================================
// Display
// ============================================================================

/// Lines shown by `help`.
const HELP_TEXT: &str = "\
Controls (type and press Enter):
  <Enter> / toggle   start or pause
  start, stop        start / pause explicitly
  reset              back to Session 25:00 with 25/5 lengths
  session+ session-  change the session length (while stopped)
  break+ break-      change the break length (while stopped)
  status             show the current state
  quit               exit";

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Prints one snapshot.
    pub fn render(snapshot: &Snapshot, format: OutputFormat) {
        match Self::format_snapshot(snapshot, format) {
            Ok(line) => println!("{}", line),
            Err(e) => Self::show_error(&format!("Failed to serialize state: {}", e)),
        }
    }

    /// Builds a subscriber callback that renders every change.
    ///
    /// In text mode a banner is printed when the mode flips.
    pub fn subscriber(format: OutputFormat) -> impl FnMut(&Snapshot) + Send + 'static {
        let mut last_mode: Option<Mode> = None;
        move |snapshot: &Snapshot| {
            if let Some(banner) = Self::mode_switch_banner(last_mode, snapshot, format) {
                println!("{}", banner);
            }
            last_mode = Some(snapshot.state.mode);
            Self::render(snapshot, format);
        }
    }

    /// Shows the list of controls.
    pub fn show_help() {
        println!("{}", HELP_TEXT);
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("{}", Self::format_error(message));
    }

    /// Formats a snapshot as a status line or a JSON object.
    pub fn format_snapshot(
        snapshot: &Snapshot,
        format: OutputFormat,
    ) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Text => Ok(Self::format_line(snapshot)),
            OutputFormat::Json => serde_json::to_string(snapshot),
        }
    }

    /// Formats a snapshot as one status line.
    pub fn format_line(snapshot: &Snapshot) -> String {
        let state = &snapshot.state;
        format!(
            "{:<7} {} [{}]  session {}m / break {}m",
            state.mode.label(),
            state.clock_face(),
            if state.running { "running" } else { "stopped" },
            snapshot.config.session_minutes(),
            snapshot.config.break_minutes(),
        )
    }

    /// Banner to show before `snapshot` when its mode differs from `previous`.
    ///
    /// Only text output gets banners.
    pub fn mode_switch_banner(
        previous: Option<Mode>,
        snapshot: &Snapshot,
        format: OutputFormat,
    ) -> Option<String> {
        let mode = snapshot.state.mode;
        if format == OutputFormat::Text && previous.is_some_and(|last| last != mode) {
            Some(format!("*** {} started ***", mode.label()))
        } else {
            None
        }
    }

    /// Formats an error message for stderr.
    pub fn format_error(message: &str) -> String {
        format!("error: {}", message)
    }
}

// ============================================================================
// Tests
// ============================================================================
