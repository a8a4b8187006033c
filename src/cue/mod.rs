//! Mode-switch cue for the interval clock.
//!
//! The engine only knows the [`Notifier`] capability: start the cue from
//! the beginning, or stop and rewind it. Concrete playback lives behind it:
//!
//! ```text
//! ┌──────────────────┐
//! │   TimerEngine    │
//! └────────┬─────────┘
//!          │ play_cue / cancel_cue
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │  RodioNotifier   │────▶│   audio thread   │
//! ├──────────────────┤     │ (OutputStream,   │
//! │  SilentNotifier  │     │  Sink)           │
//! ├──────────────────┤     └──────────────────┘
//! │  MockNotifier    │
//! └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use interval_clock::cue::{CueSource, Notifier, RodioNotifier};
//!
//! let notifier = RodioNotifier::new(CueSource::default()).expect("audio init");
//! notifier.play_cue().expect("playback failed");
//! notifier.cancel_cue().expect("cancel failed");
//! ```

mod error;
mod player;
mod source;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::debug;

pub use error::CueError;
pub use player::{try_create_notifier, RodioNotifier};
pub use source::{resolve_cue_source, CueSource, DEFAULT_TONE_HZ, DEFAULT_TONE_MS};

/// Capability for emitting the boundary cue.
///
/// Implementations should return quickly; the engine calls them while
/// holding its state lock.
pub trait Notifier: Send + Sync {
    /// Starts the cue from its beginning.
    ///
    /// # Errors
    ///
    /// Returns an error if playback could not be requested.
    fn play_cue(&self) -> Result<(), CueError>;

    /// Stops and rewinds the cue if it is playing.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be delivered.
    fn cancel_cue(&self) -> Result<(), CueError>;
}

/// Notifier used when sound is turned off.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn play_cue(&self) -> Result<(), CueError> {
        debug!("Cue suppressed (silent)");
        Ok(())
    }

    fn cancel_cue(&self) -> Result<(), CueError> {
        Ok(())
    }
}

/// A request recorded by [`MockNotifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueCall {
    /// `play_cue` was called
    Play,
    /// `cancel_cue` was called
    Cancel,
}

/// Mock notifier for testing.
#[derive(Debug, Default)]
pub struct MockNotifier {
    calls: Mutex<Vec<CueCall>>,
    should_fail: AtomicBool,
}

impl MockNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later call record itself and then fail.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn calls(&self) -> Vec<CueCall> {
        self.calls.lock().unwrap().clone()
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.count(CueCall::Play)
    }

    #[must_use]
    pub fn cancel_count(&self) -> usize {
        self.count(CueCall::Cancel)
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn count(&self, call: CueCall) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| **c == call)
            .count()
    }

    fn record(&self, call: CueCall) -> Result<(), CueError> {
        self.calls.lock().unwrap().push(call);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(CueError::PlaybackError("Mock failure".to_string()));
        }
        Ok(())
    }
}

impl Notifier for MockNotifier {
    fn play_cue(&self) -> Result<(), CueError> {
        self.record(CueCall::Play)
    }

    fn cancel_cue(&self) -> Result<(), CueError> {
        self.record(CueCall::Cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_notifier_always_succeeds() {
        let notifier = SilentNotifier;
        assert!(notifier.play_cue().is_ok());
        assert!(notifier.cancel_cue().is_ok());
    }

    #[test]
    fn test_mock_records_calls_in_order() {
        let mock = MockNotifier::new();
        mock.play_cue().unwrap();
        mock.cancel_cue().unwrap();
        mock.play_cue().unwrap();

        assert_eq!(mock.calls(), vec![CueCall::Play, CueCall::Cancel, CueCall::Play]);
        assert_eq!(mock.play_count(), 2);
        assert_eq!(mock.cancel_count(), 1);

        mock.clear_calls();
        assert!(mock.calls().is_empty());
    }

    #[test]
    fn test_mock_failure_still_records() {
        let mock = MockNotifier::new();
        mock.set_should_fail(true);

        assert!(mock.play_cue().is_err());
        assert_eq!(mock.play_count(), 1);
    }

    #[test]
    fn test_notifier_is_object_safe() {
        let notifiers: Vec<Box<dyn Notifier>> =
            vec![Box::new(SilentNotifier), Box::new(MockNotifier::new())];
        for notifier in &notifiers {
            assert!(notifier.play_cue().is_ok());
        }
    }
}
