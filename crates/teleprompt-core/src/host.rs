#![forbid(unsafe_code)]

//! Host environment abstraction.
//!
//! The controller never touches a DOM, a clock, or a callback queue directly.
//! It reads and writes the container through [`Viewport`] and asks the host to
//! schedule work through [`Scheduler`]. The host later calls back into
//! [`ScrollController::on_frame`](crate::ScrollController::on_frame) and
//! [`ScrollController::on_resume_timer`](crate::ScrollController::on_resume_timer)
//! with the token it handed out.
//!
//! ```text
//! controller ──request_frame()──▶ host ──(next frame)──▶ controller.on_frame(token)
//! controller ──set_timeout(500ms)─▶ host ──(deadline)───▶ controller.on_resume_timer(token)
//! ```

use core::time::Duration;

/// Opaque handle for a pending animation-frame callback
/// (`requestAnimationFrame` id on the web).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(pub i32);

/// Opaque handle for a pending deferred callback (`setTimeout` id on the web).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(pub i32);

/// The scrollable container the controller animates.
pub trait Viewport {
    /// Current vertical scroll offset in pixels.
    fn scroll_top(&self) -> f64;

    /// Apply a vertical scroll offset in pixels.
    fn set_scroll_top(&mut self, top: f64);

    /// Total scrollable content height in pixels.
    fn scroll_height(&self) -> f64;

    /// Visible height in pixels.
    fn client_height(&self) -> f64;

    /// Style the container so programmatic vertical scrolling works
    /// (`overflow-y: scroll`, `max-height: 100%`, `scroll-behavior: auto`).
    fn enable_programmatic_scroll(&mut self);

    /// Upper clamp bound for the scroll position.
    ///
    /// Negative when the content is shorter than the viewport; clamping then
    /// pins the position at 0.
    fn max_scroll(&self) -> f64 {
        self.scroll_height() - self.client_height()
    }
}

/// Per-frame and deferred callback primitives.
pub trait Scheduler {
    /// Schedule one animation-frame callback. `None` when the host could not
    /// schedule it.
    fn request_frame(&mut self) -> Option<FrameToken>;

    /// Cancel a pending animation-frame callback. Unknown tokens are ignored.
    fn cancel_frame(&mut self, token: FrameToken);

    /// Schedule one deferred callback after `delay`. `None` when the host
    /// could not schedule it.
    fn set_timeout(&mut self, delay: Duration) -> Option<TimerToken>;

    /// Cancel a pending deferred callback. Unknown tokens are ignored.
    fn clear_timeout(&mut self, token: TimerToken);
}
