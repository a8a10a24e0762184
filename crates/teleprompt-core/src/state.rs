#![forbid(unsafe_code)]

//! Playback state: direction, speed, position, and pending host handles.
//!
//! [`PlaybackState`] is only mutated by the controller. "Running" is not
//! stored separately; it is the presence of a pending [`FrameToken`], so the
//! loop can never be marked running without a scheduled frame or vice versa.

use crate::host::{FrameToken, TimerToken};

/// Scroll direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Downward, toward `max_scroll`.
    #[default]
    Forward,
    /// Upward, toward 0.
    Reverse,
}

impl Direction {
    /// The opposite direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }

    /// Sign applied to the per-frame delta.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Reverse => -1.0,
        }
    }

    #[must_use]
    pub const fn is_reversed(self) -> bool {
        matches!(self, Self::Reverse)
    }
}

/// Clamp `position` into `[0, max_scroll]`.
///
/// A negative `max_scroll` yields 0.
#[must_use]
pub fn clamp_position(position: f64, max_scroll: f64) -> f64 {
    position.min(max_scroll).max(0.0)
}

/// Mutable playback state owned by one controller.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub(crate) direction: Direction,
    /// Pixels per frame.
    pub(crate) speed: f64,
    pub(crate) scroll_position: f64,
    pub(crate) frame: Option<FrameToken>,
    pub(crate) resume: Option<TimerToken>,
}

impl PlaybackState {
    /// Stopped, forward, at `scroll_position` with `speed` pixels per frame.
    #[must_use]
    pub fn new(speed: f64, scroll_position: f64) -> Self {
        Self {
            direction: Direction::Forward,
            speed,
            scroll_position,
            frame: None,
            resume: None,
        }
    }

    /// Whether an animation frame is scheduled.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.frame.is_some()
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.direction.is_reversed()
    }

    /// Effective pixels per frame.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[must_use]
    pub fn scroll_position(&self) -> f64 {
        self.scroll_position
    }

    /// Pending animation-frame handle, if running.
    #[must_use]
    pub fn frame_token(&self) -> Option<FrameToken> {
        self.frame
    }

    /// Armed wheel-resume timer, if any.
    #[must_use]
    pub fn resume_token(&self) -> Option<TimerToken> {
        self.resume
    }

    /// Apply one frame step in the current direction and clamp.
    ///
    /// Returns the new position.
    pub fn advance(&mut self, max_scroll: f64) -> f64 {
        let next = self.scroll_position + self.direction.sign() * self.speed;
        self.scroll_position = clamp_position(next, max_scroll);
        self.scroll_position
    }

    /// Shift the position by `delta` pixels and clamp.
    pub fn nudge(&mut self, delta: f64, max_scroll: f64) -> f64 {
        self.scroll_position = clamp_position(self.scroll_position + delta, max_scroll);
        self.scroll_position
    }
}
