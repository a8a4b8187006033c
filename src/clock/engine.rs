//! Timer engine for the interval clock.
//!
//! This module provides the control surface used by front ends:
//! - Start / stop (pause) / toggle / reset
//! - Clamped session and break length edits, frozen while running
//! - The once-per-second countdown with the boundary mode switch
//! - Change subscriptions
//!
//! Every mutation, whether it comes from a caller or from the scheduler,
//! goes through one lock. A scheduler firing checks its token under that
//! lock before it touches the state, and `stop`/`reset` cancel the token
//! under the same lock. No tick is applied after either returns.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::{debug, info, warn};

use crate::cue::Notifier;
use crate::types::{ClockConfig, ConfigError, Mode, Snapshot, TimerState};

use super::config_store::{ConfigChange, ConfigStore};
use super::scheduler::{Scheduler, TickToken, TICK_PERIOD};
use super::transition::{self, TimerEvent};

type ChangeCallback = Box<dyn FnMut(&Snapshot) + Send>;

// ============================================================================
// Subscription
// ============================================================================

/// Handle returned by [`TimerEngine::subscribe`].
///
/// Dropping it does not unsubscribe; pass it to
/// [`TimerEngine::unsubscribe`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "keep the subscription to be able to unsubscribe"]
pub struct Subscription {
    id: u64,
}

impl Subscription {
    /// Identifier of this subscription.
    pub fn id(&self) -> u64 {
        self.id
    }
}

// ============================================================================
// EngineCore
// ============================================================================

struct EngineCore {
    store: ConfigStore,
    state: TimerState,
    notifier: Arc<dyn Notifier>,
    scheduler: Scheduler,
    subscribers: Vec<(u64, ChangeCallback)>,
    next_subscriber: u64,
}

impl EngineCore {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            config: *self.store.config(),
        }
    }

    fn publish(&mut self) {
        let snapshot = self.snapshot();
        for (id, callback) in self.subscribers.iter_mut() {
            if panic::catch_unwind(AssertUnwindSafe(|| callback(&snapshot))).is_err() {
                warn!(id = *id, "Subscriber panicked, continuing");
            }
        }
    }

    fn tick(&mut self) {
        let (next, event) = transition::tick(self.state, self.store.config());
        let Some(event) = event else {
            return;
        };

        self.state = next;

        if let TimerEvent::ModeSwitched { from, to } = event {
            info!(%from, %to, remaining = next.remaining_seconds, "Mode switched");
            match panic::catch_unwind(AssertUnwindSafe(|| self.notifier.play_cue())) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!("Failed to play cue: {}", e),
                Err(_) => warn!("Cue notifier panicked, continuing"),
            }
        }

        self.publish();
    }

    fn halt(&mut self) {
        self.scheduler.stop();
        self.state.running = false;
    }

    fn apply_config(&mut self, change: ConfigChange) -> Result<u32, ConfigError> {
        let before = *self.store.config();
        let stored = self.store.apply(change, self.state.running)?;

        if *self.store.config() != before {
            if change.mode() == self.state.mode {
                self.state.remaining_seconds = self.store.config().seconds_for(self.state.mode);
            }
            self.publish();
        }

        Ok(stored)
    }
}

fn lock(core: &Mutex<EngineCore>) -> MutexGuard<'_, EngineCore> {
    core.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// TimerEngine
// ============================================================================

/// The interval clock.
///
/// Cloning yields another handle to the same clock. Ticking needs a Tokio
/// runtime; one is picked up when the engine is created or started.
#[derive(Clone)]
pub struct TimerEngine {
    core: Arc<Mutex<EngineCore>>,
}

impl TimerEngine {
    /// Creates an idle clock with the default 25 / 5 lengths.
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self::with_config(ClockConfig::default(), notifier)
    }

    /// Creates an idle clock with the given lengths.
    pub fn with_config(config: ClockConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_scheduler(config, notifier, Scheduler::new(TICK_PERIOD))
    }

    /// Creates an idle clock driven by `scheduler`.
    pub fn with_scheduler(
        config: ClockConfig,
        notifier: Arc<dyn Notifier>,
        scheduler: Scheduler,
    ) -> Self {
        let core = EngineCore {
            store: ConfigStore::new(config),
            state: TimerState::idle(Mode::Session, &config),
            notifier,
            scheduler,
            subscribers: Vec::new(),
            next_subscriber: 0,
        };
        Self {
            core: Arc::new(Mutex::new(core)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EngineCore> {
        lock(&self.core)
    }

    /// Starts counting down. Does nothing if already running.
    pub fn start(&self) {
        let mut core = self.lock();
        self.start_locked(&mut core);
    }

    /// Pauses the countdown, keeping the remaining time. Does nothing if
    /// already idle.
    pub fn stop(&self) {
        let mut core = self.lock();
        Self::stop_locked(&mut core);
    }

    /// Stops if running, starts otherwise.
    pub fn toggle(&self) {
        let mut core = self.lock();
        if core.state.running {
            Self::stop_locked(&mut core);
        } else {
            self.start_locked(&mut core);
        }
    }

    fn start_locked(&self, core: &mut EngineCore) {
        if core.state.running {
            debug!("start ignored, already running");
            return;
        }

        let weak: Weak<Mutex<EngineCore>> = Arc::downgrade(&self.core);
        core.state.running = true;
        core.scheduler.start(move |token: &TickToken| {
            let Some(core) = weak.upgrade() else {
                return;
            };
            let mut core = lock(&core);
            if token.is_cancelled() {
                debug!(id = token.id(), "Dropped firing from cancelled tick source");
                return;
            }
            core.tick();
        });

        debug!(remaining = core.state.remaining_seconds, "Clock started");
        core.publish();
    }

    fn stop_locked(core: &mut EngineCore) {
        if !core.state.running {
            debug!("stop ignored, not running");
            return;
        }

        core.halt();
        debug!(remaining = core.state.remaining_seconds, "Clock stopped");
        core.publish();
    }

    /// Advances the countdown by one second.
    ///
    /// The scheduler calls this once per second while running; calling it
    /// by hand drives the clock deterministically. Does nothing while idle.
    pub fn tick(&self) {
        self.lock().tick();
    }

    /// Returns to `{Session, 25:00, idle}` with the default lengths and
    /// rewinds any playing cue.
    pub fn reset(&self) {
        let mut core = self.lock();
        core.halt();
        core.store.reset();
        core.state = TimerState::idle(Mode::Session, core.store.config());

        if let Err(e) = core.notifier.cancel_cue() {
            warn!("Failed to cancel cue: {}", e);
        }

        info!("Clock reset");
        core.publish();
    }

    /// Lengthens the session by a minute. Returns the resulting length.
    pub fn increment_session(&self) -> u32 {
        self.adjust(ConfigChange::Increment(Mode::Session))
    }

    /// Shortens the session by a minute. Returns the resulting length.
    pub fn decrement_session(&self) -> u32 {
        self.adjust(ConfigChange::Decrement(Mode::Session))
    }

    /// Lengthens the break by a minute. Returns the resulting length.
    pub fn increment_break(&self) -> u32 {
        self.adjust(ConfigChange::Increment(Mode::Break))
    }

    /// Shortens the break by a minute. Returns the resulting length.
    pub fn decrement_break(&self) -> u32 {
        self.adjust(ConfigChange::Decrement(Mode::Break))
    }

    /// Sets the session length, clamped to 1..=60.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RejectedWhileRunning`] while the clock runs.
    pub fn set_session_minutes(&self, minutes: u32) -> Result<u32, ConfigError> {
        self.lock().apply_config(ConfigChange::Set(Mode::Session, minutes))
    }

    /// Sets the break length, clamped to 1..=60.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RejectedWhileRunning`] while the clock runs.
    pub fn set_break_minutes(&self, minutes: u32) -> Result<u32, ConfigError> {
        self.lock().apply_config(ConfigChange::Set(Mode::Break, minutes))
    }

    fn adjust(&self, change: ConfigChange) -> u32 {
        let mut core = self.lock();
        match core.apply_config(change) {
            Ok(minutes) => minutes,
            Err(_) => core.store.config().minutes_for(change.mode()),
        }
    }

    /// Current countdown state.
    pub fn state(&self) -> TimerState {
        self.lock().state
    }

    /// Current lengths.
    pub fn config(&self) -> ClockConfig {
        *self.lock().store.config()
    }

    /// State and lengths read together.
    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    /// Returns true while counting down.
    pub fn is_running(&self) -> bool {
        self.lock().state.running
    }

    /// Registers `on_change`, called after every mutation with the new
    /// snapshot.
    ///
    /// The callback runs while the engine is locked, in mutation order.
    /// It must not call back into the engine.
    pub fn subscribe<F>(&self, on_change: F) -> Subscription
    where
        F: FnMut(&Snapshot) + Send + 'static,
    {
        let mut core = self.lock();
        core.next_subscriber += 1;
        let id = core.next_subscriber;
        core.subscribers.push((id, Box::new(on_change)));
        debug!(id, "Subscriber added");
        Subscription { id }
    }

    /// Removes a subscription. No callback for it runs after this returns.
    ///
    /// Returns false if it was already gone.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut core = self.lock();
        let before = core.subscribers.len();
        core.subscribers.retain(|(id, _)| *id != subscription.id);
        let removed = core.subscribers.len() != before;
        debug!(id = subscription.id, removed, "Subscriber removed");
        removed
    }
}

impl std::fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let core = self.lock();
        f.debug_struct("TimerEngine")
            .field("state", &core.state)
            .field("config", core.store.config())
            .field("scheduler", &core.scheduler)
            .field("subscribers", &core.subscribers.len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
