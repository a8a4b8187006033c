//! CLI module for the interval clock.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `controls`: Line-oriented controls read while the clock runs
//! - `display`: Output formatting and display logic

pub mod commands;
pub mod controls;
pub mod display;

use std::sync::Arc;

pub use commands::{Cli, Commands, OutputFormat, RunArgs};
pub use controls::{run_controls, ControlCommand, Flow, UnknownCommand};
pub use display::Display;

use crate::cue::{resolve_cue_source, try_create_notifier, Notifier, SilentNotifier};

/// Picks the cue notifier for `args`.
///
/// Falls back to silence when sound is off or no audio device exists.
pub fn build_notifier(args: &RunArgs) -> Arc<dyn Notifier> {
    if args.no_sound {
        return Arc::new(SilentNotifier);
    }

    let source = resolve_cue_source(args.cue.as_deref());
    match try_create_notifier(source) {
        Some(notifier) => notifier as Arc<dyn Notifier>,
        None => Arc::new(SilentNotifier) as Arc<dyn Notifier>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_notifier_no_sound_is_silent() {
        let args = RunArgs {
            no_sound: true,
            ..RunArgs::default()
        };
        let notifier = build_notifier(&args);
        assert!(notifier.play_cue().is_ok());
        assert!(notifier.cancel_cue().is_ok());
    }
}
