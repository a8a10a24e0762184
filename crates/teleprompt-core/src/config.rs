#![forbid(unsafe_code)]

//! Controller tuning knobs.

use core::time::Duration;

/// Scale factor converting a user-facing speed unit (slider value 1–10) into
/// scroll pixels per animation frame.
pub const DEFAULT_SPEED_MULTIPLIER: f64 = 0.25;

/// Speed units applied at construction, before any slider input.
pub const DEFAULT_INITIAL_SPEED: f64 = 1.0;

/// Quiet period after the last wheel event before playback resumes.
pub const DEFAULT_RESUME_DELAY: Duration = Duration::from_millis(500);

/// Pixels per line for `DOM_DELTA_LINE` wheel events.
pub const DEFAULT_LINE_HEIGHT_PX: f64 = 16.0;

/// Reverse-button label while scrolling upward (pressing it goes forward).
pub const DEFAULT_FORWARD_LABEL: &str = "⬇️Forward";

/// Reverse-button label while scrolling downward (pressing it reverses).
pub const DEFAULT_REVERSE_LABEL: &str = "⬆️Reverse";

/// Per-instance controller configuration.
///
/// Replaces a process-wide debug flag: two controllers on the same page can
/// log independently.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    /// Emit `tracing` diagnostics for state transitions.
    pub debug: bool,

    /// Pixels per frame for one speed unit.
    pub speed_multiplier: f64,

    /// Speed units in effect before the first `set_speed`.
    pub initial_speed: f64,

    /// Wheel quiet period before auto-resume.
    pub resume_delay: Duration,

    /// Pixel height of one line for line-mode wheel deltas.
    pub line_height_px: f64,

    /// Label shown on the reverse control while reversed.
    pub forward_label: String,

    /// Label shown on the reverse control while moving forward.
    pub reverse_label: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            debug: false,
            speed_multiplier: DEFAULT_SPEED_MULTIPLIER,
            initial_speed: DEFAULT_INITIAL_SPEED,
            resume_delay: DEFAULT_RESUME_DELAY,
            line_height_px: DEFAULT_LINE_HEIGHT_PX,
            forward_label: DEFAULT_FORWARD_LABEL.to_owned(),
            reverse_label: DEFAULT_REVERSE_LABEL.to_owned(),
        }
    }
}

impl ControllerConfig {
    /// Default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the speed multiplier. Non-finite or negative values are ignored.
    #[must_use]
    pub fn with_speed_multiplier(mut self, multiplier: f64) -> Self {
        if multiplier.is_finite() && multiplier >= 0.0 {
            self.speed_multiplier = multiplier;
        }
        self
    }

    /// Set the initial speed in user units. Non-finite values are ignored.
    #[must_use]
    pub fn with_initial_speed(mut self, speed: f64) -> Self {
        if speed.is_finite() {
            self.initial_speed = speed;
        }
        self
    }

    #[must_use]
    pub fn with_resume_delay(mut self, delay: Duration) -> Self {
        self.resume_delay = delay;
        self
    }

    /// Set the line height used for line-mode wheel deltas. Values that are
    /// not finite and positive are ignored.
    #[must_use]
    pub fn with_line_height(mut self, px: f64) -> Self {
        if px.is_finite() && px > 0.0 {
            self.line_height_px = px;
        }
        self
    }

    #[must_use]
    pub fn with_labels(mut self, forward: impl Into<String>, reverse: impl Into<String>) -> Self {
        self.forward_label = forward.into();
        self.reverse_label = reverse.into();
        self
    }

    /// Pixels per frame at the initial speed.
    #[must_use]
    pub fn initial_pixels_per_frame(&self) -> f64 {
        self.initial_speed * self.speed_multiplier
    }
}
