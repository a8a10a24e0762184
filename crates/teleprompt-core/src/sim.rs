#![forbid(unsafe_code)]

//! Deterministic simulation host.
//!
//! [`SimViewport`] and [`SimScheduler`] implement the host traits in memory
//! with a virtual clock, and [`SimHarness`] drives a controller through them
//! the way a browser would: frames at a fixed interval, timers at their
//! deadline, wheel deltas applied natively before the controller sees them.
//!
//! Replaying the same sequence of calls always yields the same positions,
//! which is what the tests rely on.

use core::time::Duration;

use crate::config::ControllerConfig;
use crate::controller::ScrollController;
use crate::host::{FrameToken, Scheduler, TimerToken, Viewport};
use crate::state::clamp_position;
use crate::wheel::WheelDelta;

/// Default simulated frame interval (60 Hz).
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// In-memory scroll container.
#[derive(Debug, Clone, PartialEq)]
pub struct SimViewport {
    scroll_top: f64,
    scroll_height: f64,
    client_height: f64,
    programmatic_scroll: bool,
}

impl SimViewport {
    /// A container scrolled to the top.
    #[must_use]
    pub fn new(scroll_height: f64, client_height: f64) -> Self {
        Self {
            scroll_top: 0.0,
            scroll_height,
            client_height,
            programmatic_scroll: false,
        }
    }

    /// Whether `enable_programmatic_scroll` has been applied.
    #[must_use]
    pub fn programmatic_scroll_enabled(&self) -> bool {
        self.programmatic_scroll
    }

    /// Change the content height, re-clamping the offset like a browser.
    pub fn set_scroll_height(&mut self, scroll_height: f64) {
        self.scroll_height = scroll_height;
        self.scroll_top = clamp_position(self.scroll_top, self.max_scroll());
    }

    /// Scroll natively by `dy` pixels (what the browser does on wheel).
    pub fn scroll_by(&mut self, dy: f64) {
        self.set_scroll_top(self.scroll_top + dy);
    }
}

impl Viewport for SimViewport {
    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn set_scroll_top(&mut self, top: f64) {
        self.scroll_top = clamp_position(top, self.max_scroll());
    }

    fn scroll_height(&self) -> f64 {
        self.scroll_height
    }

    fn client_height(&self) -> f64 {
        self.client_height
    }

    fn enable_programmatic_scroll(&mut self) {
        self.programmatic_scroll = true;
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Virtual-clock scheduler that records every request.
#[derive(Debug, Clone, Default)]
pub struct SimScheduler {
    now: Duration,
    next_id: i32,
    frames: Vec<FrameToken>,
    timers: Vec<(TimerToken, Duration)>,
    requested_frames: u64,
    cancelled_frames: u64,
    armed_timers: u64,
    cleared_timers: u64,
    unavailable: bool,
}

impl SimScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Refuse every frame and timer request while `unavailable` is set, like
    /// a browser whose `requestAnimationFrame` throws.
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    /// Move the clock. Never goes backwards.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn requested_frames(&self) -> u64 {
        self.requested_frames
    }

    #[must_use]
    pub fn cancelled_frames(&self) -> u64 {
        self.cancelled_frames
    }

    #[must_use]
    pub fn armed_timers(&self) -> u64 {
        self.armed_timers
    }

    #[must_use]
    pub fn cleared_timers(&self) -> u64 {
        self.cleared_timers
    }

    /// Absolute deadline of a pending timer.
    #[must_use]
    pub fn timer_deadline(&self, token: TimerToken) -> Option<Duration> {
        self.timers
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, deadline)| *deadline)
    }

    /// Earliest pending timer deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.iter().map(|(_, deadline)| *deadline).min()
    }

    /// Remove and return the oldest pending frame, as if it just fired.
    pub fn take_frame(&mut self) -> Option<FrameToken> {
        if self.frames.is_empty() {
            None
        } else {
            Some(self.frames.remove(0))
        }
    }

    /// Remove and return every timer due at the current time, earliest first.
    pub fn take_due_timers(&mut self) -> Vec<TimerToken> {
        let now = self.now;
        let mut due: Vec<(TimerToken, Duration)> = Vec::new();
        self.timers.retain(|&(token, deadline)| {
            if deadline <= now {
                due.push((token, deadline));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(token, deadline)| (deadline, token.0));
        due.into_iter().map(|(token, _)| token).collect()
    }

    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

impl Scheduler for SimScheduler {
    fn request_frame(&mut self) -> Option<FrameToken> {
        if self.unavailable {
            return None;
        }
        let token = FrameToken(self.next_id());
        self.frames.push(token);
        self.requested_frames += 1;
        Some(token)
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        let before = self.frames.len();
        self.frames.retain(|&t| t != token);
        if self.frames.len() != before {
            self.cancelled_frames += 1;
        }
    }

    fn set_timeout(&mut self, delay: Duration) -> Option<TimerToken> {
        if self.unavailable {
            return None;
        }
        let token = TimerToken(self.next_id());
        self.timers.push((token, self.now + delay));
        self.armed_timers += 1;
        Some(token)
    }

    fn clear_timeout(&mut self, token: TimerToken) {
        let before = self.timers.len();
        self.timers.retain(|&(t, _)| t != token);
        if self.timers.len() != before {
            self.cleared_timers += 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// Drives a simulated controller through frames, timers, and wheel input.
#[derive(Debug)]
pub struct SimHarness {
    controller: ScrollController<SimViewport, SimScheduler>,
    frame_interval: Duration,
    next_frame_at: Duration,
}

impl SimHarness {
    /// A harness over a `scroll_height` × `client_height` container.
    #[must_use]
    pub fn new(scroll_height: f64, client_height: f64, config: ControllerConfig) -> Self {
        Self::from_controller(ScrollController::bind(
            SimViewport::new(scroll_height, client_height),
            SimScheduler::new(),
            config,
        ))
    }

    /// Wrap an existing controller.
    #[must_use]
    pub fn from_controller(controller: ScrollController<SimViewport, SimScheduler>) -> Self {
        let now = controller.scheduler().now();
        Self {
            controller,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            next_frame_at: now + DEFAULT_FRAME_INTERVAL,
        }
    }

    /// Use a different frame interval. Zero is ignored.
    #[must_use]
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        if !interval.is_zero() {
            self.frame_interval = interval;
            self.next_frame_at = self.now() + interval;
        }
        self
    }

    #[must_use]
    pub fn controller(&self) -> &ScrollController<SimViewport, SimScheduler> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ScrollController<SimViewport, SimScheduler> {
        &mut self.controller
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.controller.scheduler().now()
    }

    /// Deliver the pending frame, if any. Returns whether one was delivered.
    pub fn run_frame(&mut self) -> bool {
        match self.controller.scheduler_mut().take_frame() {
            Some(token) => self.controller.on_frame(token),
            None => false,
        }
    }

    /// Deliver up to `n` frames without moving the clock. Returns how many
    /// were delivered; fewer than `n` means the loop stopped.
    pub fn run_frames(&mut self, n: usize) -> usize {
        let mut delivered = 0;
        for _ in 0..n {
            if !self.run_frame() {
                break;
            }
            delivered += 1;
        }
        delivered
    }

    /// Advance the virtual clock by `dt`, firing timers at their deadlines and
    /// frames at every frame boundary crossed. At equal times timers fire
    /// before the frame.
    pub fn advance(&mut self, dt: Duration) {
        let target = self.now() + dt;
        loop {
            let next_timer = self
                .controller
                .scheduler()
                .next_deadline()
                .filter(|&d| d <= target);
            let next_frame = Some(self.next_frame_at).filter(|&f| f <= target);
            let next = match (next_timer, next_frame) {
                (Some(t), Some(f)) => t.min(f),
                (Some(t), None) => t,
                (None, Some(f)) => f,
                (None, None) => break,
            };

            self.controller.scheduler_mut().set_now(next);
            for token in self.controller.scheduler_mut().take_due_timers() {
                self.controller.on_resume_timer(token);
            }
            if self.next_frame_at <= next {
                self.next_frame_at += self.frame_interval;
                self.run_frame();
            }
        }
        self.controller.scheduler_mut().set_now(target);
    }

    /// Wheel over the container by `dy` pixels: the viewport scrolls natively
    /// and the controller is notified.
    pub fn wheel(&mut self, dy: f64) {
        self.wheel_delta(WheelDelta::pixels(dy));
    }

    /// Wheel with an explicit delta mode.
    pub fn wheel_delta(&mut self, delta: WheelDelta) {
        let px = delta.to_pixels(
            self.controller.config().line_height_px,
            self.controller.viewport().client_height(),
        );
        self.controller.viewport_mut().scroll_by(px);
        self.controller.on_wheel(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- SimViewport --

    #[test]
    fn viewport_clamps_like_a_browser() {
        let mut vp = SimViewport::new(1000.0, 200.0);
        vp.set_scroll_top(5000.0);
        assert_eq!(vp.scroll_top(), 800.0);
        vp.scroll_by(-900.0);
        assert_eq!(vp.scroll_top(), 0.0);
    }

    #[test]
    fn shrinking_content_reclamps() {
        let mut vp = SimViewport::new(1000.0, 200.0);
        vp.set_scroll_top(700.0);
        vp.set_scroll_height(500.0);
        assert_eq!(vp.scroll_top(), 300.0);
    }

    // -- SimScheduler --

    #[test]
    fn scheduler_tokens_are_unique_and_nonzero() {
        let mut s = SimScheduler::new();
        let f = s.request_frame().unwrap();
        let t = s.set_timeout(Duration::from_millis(5)).unwrap();
        assert_ne!(f.0, 0);
        assert_ne!(f.0, t.0);
    }

    #[test]
    fn cancel_counts_only_pending() {
        let mut s = SimScheduler::new();
        let f = s.request_frame().unwrap();
        s.cancel_frame(f);
        s.cancel_frame(f);
        assert_eq!(s.cancelled_frames(), 1);
        assert_eq!(s.pending_frames(), 0);
    }

    #[test]
    fn timers_fire_at_deadline_in_order() {
        let mut s = SimScheduler::new();
        let late = s.set_timeout(Duration::from_millis(30)).unwrap();
        let early = s.set_timeout(Duration::from_millis(10)).unwrap();
        s.set_now(Duration::from_millis(9));
        assert!(s.take_due_timers().is_empty());
        s.set_now(Duration::from_millis(30));
        assert_eq!(s.take_due_timers(), vec![early, late]);
        assert_eq!(s.pending_timers(), 0);
    }

    #[test]
    fn unavailable_scheduler_hands_out_nothing() {
        let mut s = SimScheduler::new();
        s.set_unavailable(true);
        assert_eq!(s.request_frame(), None);
        assert_eq!(s.set_timeout(Duration::from_millis(5)), None);
        assert_eq!(s.pending_frames(), 0);
        assert_eq!(s.requested_frames(), 0);
        assert_eq!(s.armed_timers(), 0);
    }

    #[test]
    fn clock_never_goes_backwards() {
        let mut s = SimScheduler::new();
        s.set_now(Duration::from_millis(10));
        s.set_now(Duration::from_millis(3));
        assert_eq!(s.now(), Duration::from_millis(10));
    }

    // -- SimHarness --

    #[test]
    fn advance_runs_one_frame_per_interval() {
        let mut h = SimHarness::new(10_000.0, 200.0, ControllerConfig::default())
            .with_frame_interval(Duration::from_millis(10));
        h.controller_mut().set_speed(4.0);
        h.controller_mut().play();
        h.advance(Duration::from_millis(100));
        // One immediate step plus ten frames.
        assert_eq!(h.controller().scroll_position(), 11.0);
        assert_eq!(h.now(), Duration::from_millis(100));
    }

    #[test]
    fn advance_while_stopped_only_moves_clock() {
        let mut h = SimHarness::new(1000.0, 200.0, ControllerConfig::default());
        h.advance(Duration::from_secs(1));
        assert_eq!(h.controller().scroll_position(), 0.0);
        assert_eq!(h.controller().scheduler().requested_frames(), 0);
    }

    #[test]
    fn run_frames_stops_when_paused() {
        let mut h = SimHarness::new(1000.0, 200.0, ControllerConfig::default());
        assert_eq!(h.run_frames(5), 0);
        h.controller_mut().play();
        assert_eq!(h.run_frames(5), 5);
    }
}
