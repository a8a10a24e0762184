#![forbid(unsafe_code)]

//! Conventional child-element bindings.
//!
//! A container may carry play, pause, reverse, and speed controls identified
//! by fixed selectors. Every one of them is optional: a missing element means
//! the feature is simply not wired up. [`Controls`] holds one `Option` per
//! kind so binding code iterates only what is present.

/// The kinds of control element the controller knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Play,
    Pause,
    Reverse,
    /// Range input carrying the user-facing speed.
    SpeedInput,
    /// Text element echoing the raw speed input.
    SpeedValue,
}

impl ControlKind {
    /// All kinds, in binding order.
    pub const ALL: [Self; 5] = [
        Self::Play,
        Self::Pause,
        Self::Reverse,
        Self::SpeedInput,
        Self::SpeedValue,
    ];

    /// Conventional selector looked up inside the container.
    #[must_use]
    pub const fn default_selector(self) -> &'static str {
        match self {
            Self::Play => "#mtp-play",
            Self::Pause => "#mtp-pause",
            Self::Reverse => "#mtp-reverse",
            Self::SpeedInput => "#mtp-speed",
            Self::SpeedValue => "#speed-value",
        }
    }

    /// DOM event the control is listened on, if it is interactive.
    #[must_use]
    pub const fn event_name(self) -> Option<&'static str> {
        match self {
            Self::Play | Self::Pause | Self::Reverse => Some("click"),
            Self::SpeedInput => Some("input"),
            Self::SpeedValue => None,
        }
    }
}

/// One optional handle per [`ControlKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls<E> {
    pub play: Option<E>,
    pub pause: Option<E>,
    pub reverse: Option<E>,
    pub speed_input: Option<E>,
    pub speed_value: Option<E>,
}

impl<E> Default for Controls<E> {
    fn default() -> Self {
        Self {
            play: None,
            pause: None,
            reverse: None,
            speed_input: None,
            speed_value: None,
        }
    }
}

impl<E> Controls<E> {
    /// Resolve every kind through `lookup`. Absent elements stay `None`.
    pub fn bind(mut lookup: impl FnMut(ControlKind) -> Option<E>) -> Self {
        let mut controls = Self::default();
        for kind in ControlKind::ALL {
            *controls.slot_mut(kind) = lookup(kind);
        }
        controls
    }

    #[must_use]
    pub fn get(&self, kind: ControlKind) -> Option<&E> {
        match kind {
            ControlKind::Play => self.play.as_ref(),
            ControlKind::Pause => self.pause.as_ref(),
            ControlKind::Reverse => self.reverse.as_ref(),
            ControlKind::SpeedInput => self.speed_input.as_ref(),
            ControlKind::SpeedValue => self.speed_value.as_ref(),
        }
    }

    fn slot_mut(&mut self, kind: ControlKind) -> &mut Option<E> {
        match kind {
            ControlKind::Play => &mut self.play,
            ControlKind::Pause => &mut self.pause,
            ControlKind::Reverse => &mut self.reverse,
            ControlKind::SpeedInput => &mut self.speed_input,
            ControlKind::SpeedValue => &mut self.speed_value,
        }
    }

    /// Present bindings only.
    pub fn iter(&self) -> impl Iterator<Item = (ControlKind, &E)> {
        ControlKind::ALL
            .into_iter()
            .filter_map(move |kind| self.get(kind).map(|e| (kind, e)))
    }

    /// Number of present bindings.
    #[must_use]
    pub fn bound_count(&self) -> usize {
        self.iter().count()
    }
}

/// An event raised by a control element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEvent {
    Play,
    Pause,
    Reverse,
    /// Raw `value` of the speed input.
    SpeedInput(String),
}

/// Text the host must render after dispatching a [`ControlEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControlFeedback {
    /// New label for the reverse control.
    pub reverse_label: Option<String>,
    /// New text for the speed display.
    pub speed_display: Option<String>,
}

impl ControlFeedback {
    /// Nothing to render.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reverse_label.is_none() && self.speed_display.is_none()
    }
}

/// Parse a speed input value the way a numeric form field reads.
///
/// Surrounding whitespace is ignored and an empty field reads as 0.
/// Returns `None` for anything that is not a finite number.
#[must_use]
pub fn parse_speed_input(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
