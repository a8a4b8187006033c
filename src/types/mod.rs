//! Core data types for the interval clock.
//!
//! This module defines the data structures used for:
//! - The two clock modes (session and break)
//! - Duration configuration with clamping
//! - Timer state and the snapshots delivered to subscribers

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// Shortest configurable duration in minutes.
pub const MIN_MINUTES: u32 = 1;

/// Longest configurable duration in minutes.
pub const MAX_MINUTES: u32 = 60;

/// Default session length in minutes.
pub const DEFAULT_SESSION_MINUTES: u32 = 25;

/// Default break length in minutes.
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

// ============================================================================
// Mode
// ============================================================================

/// Which of the two phases the clock currently represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Work phase
    #[default]
    Session,
    /// Rest phase
    Break,
}

impl Mode {
    /// Returns the label shown next to the countdown.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Session => "Session",
            Mode::Break => "Break",
        }
    }

    /// Returns the mode entered at the next boundary.
    pub fn other(&self) -> Mode {
        match self {
            Mode::Session => Mode::Break,
            Mode::Break => Mode::Session,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// ClockConfig
// ============================================================================

/// Session and break lengths, each kept within [`MIN_MINUTES`, `MAX_MINUTES`].
///
/// Deserialized values are clamped like [`ClockConfig::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawClockConfig")]
pub struct ClockConfig {
    session_minutes: u32,
    break_minutes: u32,
}

#[derive(Deserialize)]
struct RawClockConfig {
    session_minutes: u32,
    break_minutes: u32,
}

impl From<RawClockConfig> for ClockConfig {
    fn from(raw: RawClockConfig) -> Self {
        Self::new(raw.session_minutes, raw.break_minutes)
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            session_minutes: DEFAULT_SESSION_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
        }
    }
}

impl ClockConfig {
    /// Creates a configuration, clamping both values into range.
    pub fn new(session_minutes: u32, break_minutes: u32) -> Self {
        Self {
            session_minutes: clamp_minutes(session_minutes),
            break_minutes: clamp_minutes(break_minutes),
        }
    }

    /// Session length in minutes.
    pub fn session_minutes(&self) -> u32 {
        self.session_minutes
    }

    /// Break length in minutes.
    pub fn break_minutes(&self) -> u32 {
        self.break_minutes
    }

    /// Length of `mode` in minutes.
    pub fn minutes_for(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Session => self.session_minutes,
            Mode::Break => self.break_minutes,
        }
    }

    /// Length of `mode` in seconds.
    pub fn seconds_for(&self, mode: Mode) -> u32 {
        self.minutes_for(mode) * 60
    }

    /// Sets the length of `mode`, clamped. Returns the stored value.
    pub fn set_minutes(&mut self, mode: Mode, minutes: u32) -> u32 {
        let minutes = clamp_minutes(minutes);
        match mode {
            Mode::Session => self.session_minutes = minutes,
            Mode::Break => self.break_minutes = minutes,
        }
        minutes
    }
}

/// Clamps a requested length into [`MIN_MINUTES`, `MAX_MINUTES`].
pub fn clamp_minutes(minutes: u32) -> u32 {
    minutes.clamp(MIN_MINUTES, MAX_MINUTES)
}

// ============================================================================
// ConfigError
// ============================================================================

/// Reasons a configuration change was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Lengths are frozen while the countdown runs.
    #[error("cannot change the {0} length while the clock is running")]
    RejectedWhileRunning(Mode),
}

// ============================================================================
// TimerState
// ============================================================================

/// Observable state of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Current mode
    pub mode: Mode,
    /// Seconds left in the current mode
    pub remaining_seconds: u32,
    /// Whether the countdown is ticking
    pub running: bool,
}

impl TimerState {
    /// Creates an idle state at the start of `mode`.
    pub fn idle(mode: Mode, config: &ClockConfig) -> Self {
        Self {
            mode,
            remaining_seconds: config.seconds_for(mode),
            running: false,
        }
    }

    /// Remaining time as `MM:SS`.
    pub fn clock_face(&self) -> String {
        format_clock(self.remaining_seconds)
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::idle(Mode::Session, &ClockConfig::default())
    }
}

/// Formats seconds as zero-padded `MM:SS`.
pub fn format_clock(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

// ============================================================================
// Snapshot
// ============================================================================

/// What subscribers receive after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Countdown state
    #[serde(flatten)]
    pub state: TimerState,
    /// Lengths at the time of the change
    pub config: ClockConfig,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod mode_tests {
        use super::*;

        #[test]
        fn test_default_is_session() {
            assert_eq!(Mode::default(), Mode::Session);
        }

        #[test]
        fn test_other_flips() {
            assert_eq!(Mode::Session.other(), Mode::Break);
            assert_eq!(Mode::Break.other(), Mode::Session);
        }

        #[test]
        fn test_label_and_display() {
            assert_eq!(Mode::Session.label(), "Session");
            assert_eq!(Mode::Break.to_string(), "Break");
        }

        #[test]
        fn test_serialize() {
            assert_eq!(serde_json::to_string(&Mode::Break).unwrap(), "\"break\"");
        }
    }

    mod clock_config_tests {
        use super::*;

        #[test]
        fn test_default_values() {
            let config = ClockConfig::default();
            assert_eq!(config.session_minutes(), 25);
            assert_eq!(config.break_minutes(), 5);
        }

        #[test]
        fn test_new_clamps_out_of_range() {
            let config = ClockConfig::new(0, 600);
            assert_eq!(config.session_minutes(), MIN_MINUTES);
            assert_eq!(config.break_minutes(), MAX_MINUTES);
        }

        #[test]
        fn test_seconds_for() {
            let config = ClockConfig::new(30, 10);
            assert_eq!(config.seconds_for(Mode::Session), 1800);
            assert_eq!(config.seconds_for(Mode::Break), 600);
        }

        #[test]
        fn test_set_minutes_returns_clamped_value() {
            let mut config = ClockConfig::default();
            assert_eq!(config.set_minutes(Mode::Break, 99), 60);
            assert_eq!(config.break_minutes(), 60);
            assert_eq!(config.set_minutes(Mode::Session, 0), 1);
            assert_eq!(config.session_minutes(), 1);
        }

        #[test]
        fn test_deserialize_clamps_out_of_range() {
            let config: ClockConfig =
                serde_json::from_str(r#"{"session_minutes":0,"break_minutes":500}"#).unwrap();
            assert_eq!(config, ClockConfig::new(MIN_MINUTES, MAX_MINUTES));

            let config: ClockConfig =
                serde_json::from_str(r#"{"session_minutes":4294967295,"break_minutes":5}"#)
                    .unwrap();
            assert_eq!(config.session_minutes(), MAX_MINUTES);
            assert_eq!(config.seconds_for(Mode::Session), 3600);
        }

        #[test]
        fn test_clamp_law() {
            for minutes in 0..=200 {
                let clamped = clamp_minutes(minutes);
                assert!((MIN_MINUTES..=MAX_MINUTES).contains(&clamped));
            }
        }
    }

    mod timer_state_tests {
        use super::*;

        #[test]
        fn test_default_state() {
            let state = TimerState::default();
            assert_eq!(state.mode, Mode::Session);
            assert_eq!(state.remaining_seconds, 1500);
            assert!(!state.running);
        }

        #[test]
        fn test_idle_uses_mode_length() {
            let state = TimerState::idle(Mode::Break, &ClockConfig::new(25, 7));
            assert_eq!(state.remaining_seconds, 420);
        }

        #[test]
        fn test_format_clock() {
            assert_eq!(format_clock(0), "00:00");
            assert_eq!(format_clock(59), "00:59");
            assert_eq!(format_clock(60), "01:00");
            assert_eq!(format_clock(1500), "25:00");
            assert_eq!(format_clock(3600), "60:00");
        }

        #[test]
        fn test_clock_face() {
            let state = TimerState {
                mode: Mode::Session,
                remaining_seconds: 125,
                running: true,
            };
            assert_eq!(state.clock_face(), "02:05");
        }
    }

    mod snapshot_tests {
        use super::*;

        #[test]
        fn test_snapshot_json_flattens_state() {
            let snapshot = Snapshot {
                state: TimerState::default(),
                config: ClockConfig::default(),
            };
            let json: serde_json::Value = serde_json::to_value(snapshot).unwrap();
            assert_eq!(json["mode"], "session");
            assert_eq!(json["remaining_seconds"], 1500);
            assert_eq!(json["running"], false);
            assert_eq!(json["config"]["session_minutes"], 25);
        }
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::RejectedWhileRunning(Mode::Break);
        assert!(err.to_string().contains("Break"));
        assert!(err.to_string().contains("running"));
    }
}
