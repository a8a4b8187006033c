//! Interval clock core.
//!
//! This module contains the countdown machinery:
//! - `config_store`: session and break lengths with clamped edits
//! - `transition`: the pure one-second transition
//! - `scheduler`: the single live once-per-second tick source
//! - `engine`: the control surface tying them together

pub mod config_store;
pub mod engine;
pub mod scheduler;
pub mod transition;

pub use config_store::{ConfigChange, ConfigStore};
pub use engine::{Subscription, TimerEngine};
pub use scheduler::{Scheduler, TickToken, TICK_PERIOD};
pub use transition::{tick, TimerEvent};
