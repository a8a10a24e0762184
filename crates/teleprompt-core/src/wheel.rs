#![forbid(unsafe_code)]

//! Wheel delta normalization.
//!
//! DOM wheel events report `deltaY` in pixels, lines, or pages depending on
//! the device (`WheelEvent.deltaMode`). The controller tracks the position in
//! pixels, so every delta is converted before it is applied.

/// Unit of a wheel delta (`WheelEvent.deltaMode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeltaMode {
    /// `DOM_DELTA_PIXEL` (0). Trackpads and most mice.
    #[default]
    Pixel,
    /// `DOM_DELTA_LINE` (1). Firefox with a notched wheel.
    Line,
    /// `DOM_DELTA_PAGE` (2).
    Page,
}

impl DeltaMode {
    /// Map the DOM constant. Unknown values are treated as pixels.
    #[must_use]
    pub const fn from_dom(mode: u32) -> Self {
        match mode {
            1 => Self::Line,
            2 => Self::Page,
            _ => Self::Pixel,
        }
    }
}

/// One vertical wheel delta as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelDelta {
    /// Positive scrolls down (toward `max_scroll`).
    pub delta_y: f64,
    pub mode: DeltaMode,
}

impl WheelDelta {
    /// A pixel-mode delta.
    #[must_use]
    pub const fn pixels(delta_y: f64) -> Self {
        Self {
            delta_y,
            mode: DeltaMode::Pixel,
        }
    }

    #[must_use]
    pub const fn new(delta_y: f64, mode: DeltaMode) -> Self {
        Self { delta_y, mode }
    }

    /// Convert to pixels. Non-finite deltas become 0.
    #[must_use]
    pub fn to_pixels(&self, line_height: f64, page_height: f64) -> f64 {
        if !self.delta_y.is_finite() {
            return 0.0;
        }
        match self.mode {
            DeltaMode::Pixel => self.delta_y,
            DeltaMode::Line => self.delta_y * line_height,
            DeltaMode::Page => self.delta_y * page_height.max(0.0),
        }
    }
}
