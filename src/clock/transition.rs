//! Pure countdown transition.
//!
//! [`tick`] is the single place where a second elapses. It takes the state
//! by value and hands back the next one, so the boundary flip and the
//! remaining-time reload always land together.

use crate::types::{ClockConfig, Mode, TimerState};

/// What a tick did to the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One second elapsed
    Decremented {
        /// Seconds left after the decrement
        remaining_seconds: u32,
    },
    /// Zero was reached on the previous tick; the other mode started
    ModeSwitched {
        /// Mode that just finished
        from: Mode,
        /// Mode that just started
        to: Mode,
    },
}

impl TimerEvent {
    /// Returns true for the boundary event, the one that owes a cue.
    pub fn is_boundary(&self) -> bool {
        matches!(self, TimerEvent::ModeSwitched { .. })
    }
}

/// Advances `state` by one second.
///
/// Returns the state unchanged and no event when the clock is idle.
/// At zero the mode flips and the remaining time is reloaded from `config`
/// in the same step; zero itself is always observed before the flip.
pub fn tick(state: TimerState, config: &ClockConfig) -> (TimerState, Option<TimerEvent>) {
    if !state.running {
        return (state, None);
    }

    if state.remaining_seconds > 0 {
        let remaining_seconds = state.remaining_seconds - 1;
        let next = TimerState {
            remaining_seconds,
            ..state
        };
        return (next, Some(TimerEvent::Decremented { remaining_seconds }));
    }

    let to = state.mode.other();
    let next = TimerState {
        mode: to,
        remaining_seconds: config.seconds_for(to),
        running: true,
    };
    (
        next,
        Some(TimerEvent::ModeSwitched {
            from: state.mode,
            to,
        }),
    )
}
