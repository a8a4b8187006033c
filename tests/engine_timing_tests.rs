//! Real-time behaviour of the timer engine.
//!
//! These tests drive the engine through its own scheduler on a paused Tokio
//! clock, so one simulated second is exactly one tick and the tests run
//! instantly. Sleeps land on half seconds to stay clear of tick instants.

use std::sync::{Arc, Mutex};

use tokio::time::{sleep, Duration};

use interval_clock::cue::MockNotifier;
use interval_clock::types::{ClockConfig, Mode, Snapshot, TimerState};
use interval_clock::TimerEngine;

// ============================================================================
// Test Helpers
// ============================================================================

fn create_engine() -> (TimerEngine, Arc<MockNotifier>) {
    let mock = Arc::new(MockNotifier::new());
    let engine = TimerEngine::new(mock.clone());
    (engine, mock)
}

async fn sleep_ms(ms: u64) {
    sleep(Duration::from_millis(ms)).await;
}

fn running(mode: Mode, remaining_seconds: u32) -> TimerState {
    TimerState {
        mode,
        remaining_seconds,
        running: true,
    }
}

// ============================================================================
// Tick cadence
// ============================================================================

#[tokio::test(start_paused = true)]
async fn ticks_once_per_second() {
    let (engine, _mock) = create_engine();
    engine.start();

    sleep_ms(500).await;
    assert_eq!(engine.state().remaining_seconds, 1500);

    sleep_ms(3000).await;
    assert_eq!(engine.state(), running(Mode::Session, 1497));
}

#[tokio::test(start_paused = true)]
async fn repeated_start_does_not_add_tick_sources() {
    let (engine, _mock) = create_engine();
    engine.start();
    sleep_ms(500).await;
    engine.start();
    engine.start();

    sleep_ms(3000).await;
    assert_eq!(engine.state().remaining_seconds, 1497);
}

#[tokio::test(start_paused = true)]
async fn repeated_stop_is_harmless() {
    let (engine, _mock) = create_engine();
    engine.start();
    sleep_ms(2500).await;
    engine.stop();
    engine.stop();

    sleep_ms(5000).await;
    assert_eq!(engine.state().remaining_seconds, 1498);
    assert!(!engine.is_running());
}

#[tokio::test(start_paused = true)]
async fn stop_start_cycles_never_double_decrement() {
    let (engine, _mock) = create_engine();

    for _ in 0..5 {
        engine.start();
        sleep_ms(1500).await;
        engine.stop();
        sleep_ms(2000).await;
    }

    // One tick per 1.5 s running window, none while stopped.
    assert_eq!(engine.state().remaining_seconds, 1495);
}

#[tokio::test(start_paused = true)]
async fn pause_resume_preserves_remaining() {
    let (engine, _mock) = create_engine();
    engine.start();
    sleep_ms(10_500).await;
    engine.stop();
    let paused = engine.state().remaining_seconds;
    assert_eq!(paused, 1490);

    sleep_ms(60_000).await;
    engine.start();
    assert_eq!(engine.state().remaining_seconds, paused);

    sleep_ms(1500).await;
    assert_eq!(engine.state().remaining_seconds, paused - 1);
}

// ============================================================================
// Boundaries
// ============================================================================

#[tokio::test(start_paused = true)]
async fn zero_then_switch_in_real_time() {
    let (engine, mock) = create_engine();
    assert_eq!(engine.set_session_minutes(1), Ok(1));
    assert_eq!(engine.set_break_minutes(2), Ok(2));
    engine.start();

    sleep_ms(60_500).await;
    assert_eq!(engine.state(), running(Mode::Session, 0));
    assert_eq!(mock.play_count(), 0);

    sleep_ms(1000).await;
    assert_eq!(engine.state(), running(Mode::Break, 120));
    assert_eq!(mock.play_count(), 1);

    sleep_ms(121_000).await;
    assert_eq!(engine.state(), running(Mode::Session, 60));
    assert_eq!(mock.play_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn full_default_cycle() {
    let (engine, mock) = create_engine();
    engine.start();

    sleep_ms(1_501_500).await;
    assert_eq!(engine.state(), running(Mode::Break, 300));
    assert_eq!(mock.play_count(), 1);

    sleep_ms(301_000).await;
    assert_eq!(engine.state(), running(Mode::Session, 1500));
    assert_eq!(mock.play_count(), 2);
}

// ============================================================================
// Reset and configuration
// ============================================================================

#[tokio::test(start_paused = true)]
async fn reset_cancels_ticking() {
    let (engine, mock) = create_engine();
    engine.increment_break();
    engine.start();
    sleep_ms(2500).await;

    engine.reset();
    assert_eq!(engine.state(), TimerState::default());
    assert_eq!(engine.config(), ClockConfig::default());
    assert_eq!(mock.cancel_count(), 1);

    sleep_ms(5000).await;
    assert_eq!(engine.state(), TimerState::default());
}

#[tokio::test(start_paused = true)]
async fn config_is_frozen_while_ticking() {
    let (engine, _mock) = create_engine();
    engine.start();
    sleep_ms(1500).await;

    assert_eq!(engine.increment_break(), 5);
    assert_eq!(engine.decrement_session(), 25);
    assert_eq!(engine.state(), running(Mode::Session, 1499));
}

// ============================================================================
// Subscriptions and isolation
// ============================================================================

#[tokio::test(start_paused = true)]
async fn subscriber_sees_every_tick_in_order() {
    let (engine, _mock) = create_engine();
    let seen: Arc<Mutex<Vec<Snapshot>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let subscription = engine.subscribe(move |snapshot| sink.lock().unwrap().push(*snapshot));

    engine.start();
    sleep_ms(3500).await;
    assert!(engine.unsubscribe(subscription));
    sleep_ms(3000).await;

    let remaining: Vec<u32> = seen
        .lock()
        .unwrap()
        .iter()
        .map(|s| s.state.remaining_seconds)
        .collect();
    assert_eq!(remaining, vec![1500, 1499, 1498, 1497]);
}

#[tokio::test(start_paused = true)]
async fn panicking_subscriber_does_not_freeze_ticking() {
    let (engine, _mock) = create_engine();
    let calls = Arc::new(Mutex::new(0u32));
    let counter = calls.clone();
    let _subscription = engine.subscribe(move |_| {
        let mut calls = counter.lock().unwrap();
        *calls += 1;
        if *calls == 3 {
            drop(calls);
            panic!("subscriber failed on its third update");
        }
    });

    engine.start();
    sleep_ms(10_500).await;

    assert_eq!(engine.state(), running(Mode::Session, 1490));
    assert_eq!(*calls.lock().unwrap(), 11);
}

#[tokio::test(start_paused = true)]
async fn engines_do_not_interfere() {
    let (first, _first_mock) = create_engine();
    let (second, _second_mock) = create_engine();

    first.start();
    sleep_ms(2500).await;
    second.start();
    sleep_ms(1700).await;
    first.stop();
    sleep_ms(1000).await;

    assert_eq!(first.state().remaining_seconds, 1496);
    assert_eq!(second.state().remaining_seconds, 1498);
}

#[tokio::test(start_paused = true)]
async fn dropping_engine_stops_ticking() {
    let (engine, mock) = create_engine();
    engine.set_session_minutes(1).unwrap();
    engine.start();
    drop(engine);

    sleep_ms(120_000).await;
    assert_eq!(mock.play_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn clones_share_one_clock() {
    let (engine, _mock) = create_engine();
    let handle = engine.clone();

    engine.start();
    handle.start();
    sleep_ms(2500).await;
    handle.stop();

    assert_eq!(engine.state().remaining_seconds, 1498);
    assert!(!engine.is_running());
}
