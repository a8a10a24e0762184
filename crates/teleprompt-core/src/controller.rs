#![forbid(unsafe_code)]

//! The autoscroll state machine.
//!
//! [`ScrollController`] owns one [`PlaybackState`] and drives a container
//! through the host's [`Viewport`] and [`Scheduler`]. It is step-based: the
//! host calls [`on_frame`](ScrollController::on_frame) when a requested frame
//! arrives and [`on_resume_timer`](ScrollController::on_resume_timer) when the
//! wheel quiet period elapses.
//!
//! ```text
//!              play()                      wheel (was running)
//!   Stopped ───────────▶ Running ───────────────────────────▶ Stopped + resume armed
//!      ▲                    │                                        │
//!      └──── pause() ───────┘◀──────── quiet period elapsed ─────────┘
//! ```
//!
//! `reverse()` and `set_speed()` never change Stopped/Running.
//!
//! At most one frame and one resume timer are pending at any time. A new
//! wheel event cancels the armed timer before arming a fresh one, and
//! `pause()` cancels both.

use crate::config::ControllerConfig;
use crate::controls::{ControlEvent, ControlFeedback, parse_speed_input};
use crate::error::InvalidContainerError;
use crate::host::{FrameToken, Scheduler, TimerToken, Viewport};
use crate::state::{PlaybackState, clamp_position};
use crate::wheel::WheelDelta;

/// Diagnostics gated on the instance's `debug` flag.
macro_rules! diag {
    ($self:expr, $($arg:tt)+) => {
        if $self.config.debug {
            tracing::debug!(target: "teleprompt", $($arg)+);
        }
    };
}

/// Autoscroll controller bound to a single container.
#[derive(Debug)]
pub struct ScrollController<V, S> {
    viewport: V,
    scheduler: S,
    config: ControllerConfig,
    state: PlaybackState,
}

impl<V: Viewport, S: Scheduler> ScrollController<V, S> {
    /// Bind a controller to `container`.
    ///
    /// Fails with [`InvalidContainerError`] when the container is absent.
    /// Otherwise styles the container for programmatic scrolling and starts
    /// Stopped, moving forward at the configured initial speed, from the
    /// container's current offset.
    pub fn new(
        container: Option<V>,
        scheduler: S,
        config: ControllerConfig,
    ) -> Result<Self, InvalidContainerError> {
        let viewport = container.ok_or(InvalidContainerError)?;
        Ok(Self::bind(viewport, scheduler, config))
    }

    /// Bind a controller to a container that is known to exist.
    pub fn bind(mut viewport: V, scheduler: S, config: ControllerConfig) -> Self {
        viewport.enable_programmatic_scroll();
        let position = clamp_position(viewport.scroll_top(), viewport.max_scroll());
        let state = PlaybackState::new(config.initial_pixels_per_frame(), position);
        if config.debug {
            tracing::debug!(
                target: "teleprompt",
                speed = state.speed(),
                position,
                "controller created"
            );
        }
        Self {
            viewport,
            scheduler,
            config,
            state,
        }
    }

    // -- Playback -----------------------------------------------------------

    /// Start the loop. No-op when a frame is already scheduled.
    ///
    /// Starting re-reads the container offset, since native scrolling may
    /// have moved it while stopped. The first step runs immediately;
    /// subsequent steps run on each frame. Starting also disarms a pending
    /// wheel-resume timer.
    pub fn play(&mut self) {
        diag!(self, "playing");
        if self.state.is_running() {
            return;
        }
        self.disarm_resume();
        self.sync_from_viewport();
        self.step();
        self.schedule_frame();
    }

    /// Stop the loop and disarm any pending wheel resume. Idempotent.
    pub fn pause(&mut self) {
        diag!(self, "paused");
        self.cancel_frame();
        self.disarm_resume();
    }

    /// Toggle direction. Does not start or stop the loop.
    pub fn reverse(&mut self) {
        self.state.direction = self.state.direction.toggled();
        diag!(self, reversed = self.state.is_reversed(), "reversed");
    }

    /// Set the speed in user units; the per-frame delta becomes
    /// `value * speed_multiplier`. Non-finite values are ignored.
    pub fn set_speed(&mut self, value: f64) {
        if !value.is_finite() {
            diag!(self, value, "ignoring non-finite speed");
            return;
        }
        self.state.speed = value * self.config.speed_multiplier;
        diag!(self, value, speed = self.state.speed, "speed changed");
    }

    // -- Host callbacks -----------------------------------------------------

    /// Deliver a scheduled animation frame.
    ///
    /// Advances one step and schedules the next frame. Returns `false` (and
    /// does nothing) when `token` is not the pending frame.
    pub fn on_frame(&mut self, token: FrameToken) -> bool {
        if self.state.frame != Some(token) {
            return false;
        }
        self.step();
        self.schedule_frame();
        true
    }

    /// Handle a wheel event over the container.
    ///
    /// Pauses, folds the delta into the tracked position as an estimate of
    /// the native scroll, and, when playback was running or already waiting
    /// to resume, restarts the quiet-period countdown. The container's real
    /// offset replaces the estimate when playback restarts.
    pub fn on_wheel(&mut self, delta: WheelDelta) {
        let _span = self.config.debug.then(|| {
            tracing::debug_span!(target: "teleprompt", "wheel", dy = delta.delta_y).entered()
        });

        let resume = self.state.is_running() || self.state.resume.is_some();
        self.cancel_frame();
        self.disarm_resume();

        let px = delta.to_pixels(self.config.line_height_px, self.viewport.client_height());
        let position = self.state.nudge(px, self.viewport.max_scroll());
        diag!(self, px, position, resume, "wheel interrupt");

        if resume {
            self.state.resume = self.scheduler.set_timeout(self.config.resume_delay);
            if self.state.resume.is_none() {
                diag!(self, "resume timer unavailable; staying paused");
            }
        }
    }

    /// Deliver the wheel quiet-period timer.
    ///
    /// Resumes playback from the container's current offset when `token` is
    /// the armed timer; stale tokens are ignored and `false` is returned.
    pub fn on_resume_timer(&mut self, token: TimerToken) -> bool {
        if self.state.resume != Some(token) {
            return false;
        }
        self.state.resume = None;
        diag!(self, "resuming after wheel");
        self.play();
        true
    }

    /// Route a control-element event and report what the host should render.
    pub fn dispatch(&mut self, event: ControlEvent) -> ControlFeedback {
        match event {
            ControlEvent::Play => {
                self.play();
                ControlFeedback::default()
            }
            ControlEvent::Pause => {
                self.pause();
                ControlFeedback::default()
            }
            ControlEvent::Reverse => {
                self.reverse();
                ControlFeedback {
                    reverse_label: Some(self.reverse_label().to_owned()),
                    speed_display: None,
                }
            }
            ControlEvent::SpeedInput(raw) => {
                diag!(self, raw = raw.as_str(), "speed input");
                if let Some(value) = parse_speed_input(&raw) {
                    self.set_speed(value);
                }
                ControlFeedback {
                    reverse_label: None,
                    speed_display: Some(raw),
                }
            }
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.state.is_reversed()
    }

    /// Effective pixels per frame.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.state.speed()
    }

    #[must_use]
    pub fn scroll_position(&self) -> f64 {
        self.state.scroll_position()
    }

    /// Whether a wheel-resume timer is armed.
    #[must_use]
    pub fn resume_pending(&self) -> bool {
        self.state.resume.is_some()
    }

    /// Label the reverse control should show for the current direction.
    #[must_use]
    pub fn reverse_label(&self) -> &str {
        if self.state.is_reversed() {
            &self.config.forward_label
        } else {
            &self.config.reverse_label
        }
    }

    #[must_use]
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Mutable container access, for hosts that resize or replace content.
    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    // -- Internals ----------------------------------------------------------

    fn sync_from_viewport(&mut self) {
        self.state.scroll_position =
            clamp_position(self.viewport.scroll_top(), self.viewport.max_scroll());
    }

    fn schedule_frame(&mut self) {
        self.state.frame = self.scheduler.request_frame();
        if self.state.frame.is_none() {
            diag!(self, "frame unavailable; stopping");
        }
    }

    fn step(&mut self) {
        let position = self.state.advance(self.viewport.max_scroll());
        self.viewport.set_scroll_top(position);
    }

    fn cancel_frame(&mut self) {
        if let Some(token) = self.state.frame.take() {
            self.scheduler.cancel_frame(token);
        }
    }

    fn disarm_resume(&mut self) {
        if let Some(token) = self.state.resume.take() {
            self.scheduler.clear_timeout(token);
        }
    }
}
