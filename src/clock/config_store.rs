//! Duration store for the interval clock.
//!
//! Holds the session and break lengths and applies clamped edits.
//! Edits are refused while the countdown runs.

use tracing::debug;

use crate::types::{ClockConfig, ConfigError, Mode};

/// A single edit to one of the two lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigChange {
    /// Add one minute
    Increment(Mode),
    /// Remove one minute
    Decrement(Mode),
    /// Replace with the given minutes
    Set(Mode, u32),
}

impl ConfigChange {
    /// Mode whose length this change touches.
    pub fn mode(&self) -> Mode {
        match *self {
            ConfigChange::Increment(mode)
            | ConfigChange::Decrement(mode)
            | ConfigChange::Set(mode, _) => mode,
        }
    }
}

/// Owns the clock's [`ClockConfig`].
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    config: ClockConfig,
}

impl ConfigStore {
    /// Creates a store seeded with `config`.
    pub fn new(config: ClockConfig) -> Self {
        Self { config }
    }

    /// Current lengths.
    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Applies `change` unless `running` is set.
    ///
    /// Returns the resulting length of the touched mode. Out-of-range
    /// results are clamped rather than refused.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RejectedWhileRunning`] when `running` is true;
    /// the stored lengths are left untouched.
    pub fn apply(&mut self, change: ConfigChange, running: bool) -> Result<u32, ConfigError> {
        let mode = change.mode();
        if running {
            debug!(?change, "config change rejected while running");
            return Err(ConfigError::RejectedWhileRunning(mode));
        }

        let current = self.config.minutes_for(mode);
        let requested = match change {
            ConfigChange::Increment(_) => current.saturating_add(1),
            ConfigChange::Decrement(_) => current.saturating_sub(1),
            ConfigChange::Set(_, minutes) => minutes,
        };

        let stored = self.config.set_minutes(mode, requested);
        debug!(%mode, stored, "config updated");
        Ok(stored)
    }

    /// Restores the default lengths.
    pub fn reset(&mut self) {
        self.config = ClockConfig::default();
    }
}
