//! Periodic tick source for the interval clock.
//!
//! A [`Scheduler`] owns at most one running tick task. Starting again
//! replaces the previous task, and stopping cancels it. Each firing gets
//! the [`TickToken`] of the task that produced it so the receiver can
//! re-check cancellation at its own serialization point.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::{debug, error};

/// Default firing period.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

// ============================================================================
// TickToken
// ============================================================================

/// Opaque identity of one tick source.
#[derive(Debug, Clone)]
pub struct TickToken {
    id: u64,
    cancelled: Arc<AtomicBool>,
}

impl TickToken {
    fn new(id: u64) -> Self {
        Self {
            id,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Sequence number of the source, unique per scheduler.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns true once the owning scheduler has stopped or replaced it.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

// ============================================================================
// Scheduler
// ============================================================================

struct ActiveSource {
    token: TickToken,
    task: JoinHandle<()>,
}

/// Owner of the single live tick source.
pub struct Scheduler {
    period: Duration,
    runtime: Option<Handle>,
    next_id: u64,
    active: Option<ActiveSource>,
}

impl Scheduler {
    /// Creates a scheduler firing every `period`.
    ///
    /// Binds to the current Tokio runtime if there is one; otherwise the
    /// runtime is looked up again on [`Scheduler::start`].
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            runtime: Handle::try_current().ok(),
            next_id: 0,
            active: None,
        }
    }

    /// Firing period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Starts a new tick source calling `callback` once per period.
    ///
    /// Any active source is cancelled first. The first firing happens one
    /// period after this call, and a firing never begins before the
    /// previous one has returned.
    ///
    /// Returns the new source's token, or `None` when no Tokio runtime is
    /// reachable.
    pub fn start<F>(&mut self, mut callback: F) -> Option<TickToken>
    where
        F: FnMut(&TickToken) + Send + 'static,
    {
        self.stop();

        let runtime = match self.runtime.clone().or_else(|| Handle::try_current().ok()) {
            Some(runtime) => runtime,
            None => {
                error!("No Tokio runtime available, tick source not started");
                return None;
            }
        };

        self.next_id += 1;
        let token = TickToken::new(self.next_id);
        let task_token = token.clone();
        let period = self.period;

        let task = runtime.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if task_token.is_cancelled() {
                    break;
                }
                callback(&task_token);
            }
        });

        debug!(id = token.id(), "Tick source started");
        self.active = Some(ActiveSource {
            token: token.clone(),
            task,
        });
        Some(token)
    }

    /// Cancels the active tick source, if any.
    ///
    /// After this returns the cancelled token reports
    /// [`TickToken::is_cancelled`], and the task no longer starts firings.
    /// Returns true if a source was active.
    pub fn stop(&mut self) -> bool {
        match self.active.take() {
            Some(source) => {
                source.token.cancel();
                source.task.abort();
                debug!(id = source.token.id(), "Tick source stopped");
                true
            }
            None => false,
        }
    }

    /// Returns true while a tick source is live.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Token of the live tick source.
    pub fn active_token(&self) -> Option<&TickToken> {
        self.active.as_ref().map(|source| &source.token)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("period", &self.period)
            .field("active", &self.active.as_ref().map(|s| s.token.id()))
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
