//! End-to-end playback scenarios driven through the simulation host.
//!
//! Each test runs the controller the way a browser would: frames at a fixed
//! interval, timers at their deadlines, wheel deltas scrolled natively first.

use core::time::Duration;

use pretty_assertions::assert_eq;
use teleprompt_core::sim::{SimHarness, SimScheduler, SimViewport};
use teleprompt_core::{
    ControlEvent, ControllerConfig, DeltaMode, InvalidContainerError, ScrollController,
    Viewport, WheelDelta,
};

fn harness() -> SimHarness {
    SimHarness::new(1000.0, 200.0, ControllerConfig::default())
}

/// Run at 1 px/frame until the position reaches `target` (whole pixels).
fn play_to(h: &mut SimHarness, target: f64) {
    h.controller_mut().set_speed(4.0);
    h.controller_mut().play();
    let remaining = (target - h.controller().scroll_position()) as usize;
    assert_eq!(h.run_frames(remaining), remaining);
    assert_eq!(h.controller().scroll_position(), target);
}

// ── Clamping ──────────────────────────────────────────────────────────────

#[test]
fn forward_run_stops_exactly_at_max_scroll() {
    let mut h = harness();
    h.controller_mut().play(); // step 1 of 3200
    h.run_frames(3199);
    assert_eq!(h.controller().scroll_position(), 800.0);

    // Further frames stay pinned.
    h.run_frames(10);
    assert_eq!(h.controller().scroll_position(), 800.0);
    assert_eq!(h.controller().viewport().scroll_top(), 800.0);
    assert!(h.controller().is_running());
}

#[test]
fn reverse_run_stops_at_zero() {
    let mut h = harness();
    play_to(&mut h, 20.0);
    h.controller_mut().reverse();
    h.run_frames(100);
    assert_eq!(h.controller().scroll_position(), 0.0);
}

#[test]
fn content_shorter_than_viewport_never_moves() {
    let mut h = SimHarness::new(150.0, 200.0, ControllerConfig::default());
    h.controller_mut().play();
    h.run_frames(50);
    assert_eq!(h.controller().scroll_position(), 0.0);
}

#[test]
fn shrinking_content_reclamps_on_next_frame() {
    let mut h = harness();
    play_to(&mut h, 700.0);
    h.controller_mut().viewport_mut().set_scroll_height(500.0);
    h.run_frame();
    assert_eq!(h.controller().scroll_position(), 300.0);
}

// ── Wheel interrupt ───────────────────────────────────────────────────────

#[test]
fn wheel_while_running_pauses_then_resumes_after_quiet_period() {
    let mut h = harness();
    play_to(&mut h, 100.0);

    h.wheel(50.0);
    assert!(!h.controller().is_running());
    assert_eq!(h.controller().scroll_position(), 150.0);
    assert_eq!(h.controller().viewport().scroll_top(), 150.0);

    h.advance(Duration::from_millis(499));
    assert!(!h.controller().is_running());

    h.advance(Duration::from_millis(1));
    assert!(h.controller().is_running());
    // Resuming continues from the wheel position.
    assert_eq!(h.controller().scroll_position(), 151.0);
}

#[test]
fn resume_follows_native_scroll_not_the_wheel_estimate() {
    let mut h = harness();
    play_to(&mut h, 100.0);

    // The page uses 19px lines, so the browser scrolls 57px for three lines
    // while the controller estimates 48px.
    h.controller_mut().viewport_mut().scroll_by(57.0);
    h.controller_mut().on_wheel(WheelDelta::new(3.0, DeltaMode::Line));
    assert_eq!(h.controller().viewport().scroll_top(), 157.0);

    h.advance(Duration::from_millis(500));
    assert!(h.controller().is_running());
    assert_eq!(h.controller().scroll_position(), 158.0);
    assert_eq!(h.controller().viewport().scroll_top(), 158.0);
}

#[test]
fn play_after_stopped_wheel_starts_from_native_offset() {
    let mut h = harness();
    h.controller_mut().set_speed(4.0);
    h.controller_mut().viewport_mut().scroll_by(70.0);
    h.controller_mut().on_wheel(WheelDelta::new(4.0, DeltaMode::Line));
    assert_eq!(h.controller().scroll_position(), 64.0);

    h.controller_mut().play();
    assert_eq!(h.controller().scroll_position(), 71.0);
}

#[test]
fn wheel_while_stopped_never_resumes() {
    let mut h = harness();
    h.wheel(50.0);
    h.advance(Duration::from_millis(500));
    assert!(!h.controller().is_running());
    h.advance(Duration::from_secs(5));
    assert!(!h.controller().is_running());
    assert_eq!(h.controller().scroll_position(), 50.0);
}

#[test]
fn every_wheel_tick_restarts_the_countdown() {
    let mut h = harness();
    play_to(&mut h, 100.0);

    h.wheel(10.0);
    h.advance(Duration::from_millis(300));
    h.wheel(10.0);
    h.advance(Duration::from_millis(300));
    // 600 ms since the first tick, 300 ms since the last.
    assert!(!h.controller().is_running());
    h.wheel(-5.0);
    h.advance(Duration::from_millis(499));
    assert!(!h.controller().is_running());
    h.advance(Duration::from_millis(1));
    assert!(h.controller().is_running());

    let sched = h.controller().scheduler();
    assert_eq!(sched.armed_timers(), 3);
    assert_eq!(sched.cleared_timers(), 2);
    assert_eq!(sched.pending_timers(), 0);
}

#[test]
fn pause_during_quiet_period_cancels_resume() {
    let mut h = harness();
    play_to(&mut h, 100.0);
    h.wheel(10.0);
    h.controller_mut().dispatch(ControlEvent::Pause);
    h.advance(Duration::from_secs(1));
    assert!(!h.controller().is_running());
    assert_eq!(h.controller().scroll_position(), 110.0);
}

#[test]
fn line_mode_wheel_is_scaled_to_pixels() {
    let mut h = harness();
    h.wheel_delta(WheelDelta::new(2.0, DeltaMode::Line));
    assert_eq!(h.controller().scroll_position(), 32.0);
    assert_eq!(h.controller().viewport().scroll_top(), 32.0);
}

// ── Construction ──────────────────────────────────────────────────────────

#[test]
fn absent_container_is_rejected() {
    let result = ScrollController::<SimViewport, SimScheduler>::new(
        None,
        SimScheduler::new(),
        ControllerConfig::default(),
    );
    assert_eq!(result.err(), Some(InvalidContainerError));
}

// ── Controls ──────────────────────────────────────────────────────────────

#[test]
fn slider_drives_speed_and_display() {
    let mut h = harness();
    let feedback = h
        .controller_mut()
        .dispatch(ControlEvent::SpeedInput("10".to_owned()));
    assert_eq!(feedback.speed_display.as_deref(), Some("10"));
    assert_eq!(h.controller().speed(), 2.5);

    h.controller_mut().dispatch(ControlEvent::Play);
    h.run_frames(3);
    assert_eq!(h.controller().scroll_position(), 10.0);
}

#[test]
fn reverse_button_label_tracks_direction() {
    let mut h = SimHarness::new(
        1000.0,
        200.0,
        ControllerConfig::default().with_labels("down", "up"),
    );
    assert_eq!(h.controller().reverse_label(), "up");
    let fb = h.controller_mut().dispatch(ControlEvent::Reverse);
    assert_eq!(fb.reverse_label.as_deref(), Some("down"));
    assert!(h.controller().is_reversed());
}
