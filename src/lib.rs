//! Interval Clock Library
//!
//! This library provides the core functionality for the 25 + 5 interval
//! clock. It includes:
//! - Timer engine with the session/break countdown and boundary switch
//! - A scheduler that owns the single live once-per-second tick source
//! - Clamped duration configuration
//! - The cue capability and its rodio-backed player
//! - CLI command parsing, terminal controls and display utilities

pub mod cli;
pub mod clock;
pub mod cue;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{ClockConfig, ConfigError, Mode, Snapshot, TimerState};

pub use clock::{
    ConfigChange, ConfigStore, Scheduler, Subscription, TickToken, TimerEngine, TimerEvent,
};

pub use cue::{
    try_create_notifier, CueCall, CueError, CueSource, MockNotifier, Notifier, RodioNotifier,
    SilentNotifier,
};
