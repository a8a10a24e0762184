#![forbid(unsafe_code)]

//! Constructor options.
//!
//! The JS host passes a plain object; [`RawOptions`] is its field-for-field
//! image with nothing validated yet. [`RawOptions::into_options`] turns it
//! into a [`ControllerConfig`] plus control selectors, falling back to the
//! defaults for anything missing or out of range.
//!
//! No JS types live here, so option handling is tested natively.

use core::time::Duration;

use teleprompt_core::{ControlKind, ControllerConfig};

/// Unvalidated options as read from the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawOptions {
    pub debug: Option<bool>,
    /// Initial speed in user units.
    pub speed: Option<f64>,
    pub multiplier: Option<f64>,
    pub resume_delay_ms: Option<f64>,
    pub line_height: Option<f64>,
    pub forward_label: Option<String>,
    pub reverse_label: Option<String>,
    pub selectors: RawSelectors,
}

/// Per-control selector overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSelectors {
    pub play: Option<String>,
    pub pause: Option<String>,
    pub reverse: Option<String>,
    pub speed_input: Option<String>,
    pub speed_value: Option<String>,
}

impl RawSelectors {
    /// Mutable slot for one control kind.
    pub fn slot_mut(&mut self, kind: ControlKind) -> &mut Option<String> {
        match kind {
            ControlKind::Play => &mut self.play,
            ControlKind::Pause => &mut self.pause,
            ControlKind::Reverse => &mut self.reverse,
            ControlKind::SpeedInput => &mut self.speed_input,
            ControlKind::SpeedValue => &mut self.speed_value,
        }
    }
}

/// Option keys for each control selector, camelCase first.
#[must_use]
pub const fn selector_keys(kind: ControlKind) -> &'static [&'static str] {
    match kind {
        ControlKind::Play => &["play"],
        ControlKind::Pause => &["pause"],
        ControlKind::Reverse => &["reverse"],
        ControlKind::SpeedInput => &["speedInput", "speed_input"],
        ControlKind::SpeedValue => &["speedValue", "speed_value"],
    }
}

/// Resolved control selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectors {
    play: String,
    pause: String,
    reverse: String,
    speed_input: String,
    speed_value: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            play: ControlKind::Play.default_selector().to_owned(),
            pause: ControlKind::Pause.default_selector().to_owned(),
            reverse: ControlKind::Reverse.default_selector().to_owned(),
            speed_input: ControlKind::SpeedInput.default_selector().to_owned(),
            speed_value: ControlKind::SpeedValue.default_selector().to_owned(),
        }
    }
}

impl Selectors {
    #[must_use]
    pub fn get(&self, kind: ControlKind) -> &str {
        match kind {
            ControlKind::Play => &self.play,
            ControlKind::Pause => &self.pause,
            ControlKind::Reverse => &self.reverse,
            ControlKind::SpeedInput => &self.speed_input,
            ControlKind::SpeedValue => &self.speed_value,
        }
    }
}

/// Validated options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrompterOptions {
    pub config: ControllerConfig,
    pub selectors: Selectors,
}

impl RawOptions {
    /// Validate and apply defaults.
    #[must_use]
    pub fn into_options(self) -> PrompterOptions {
        let mut config = ControllerConfig::default();
        if let Some(debug) = self.debug {
            config = config.with_debug(debug);
        }
        if let Some(multiplier) = self.multiplier {
            config = config.with_speed_multiplier(multiplier);
        }
        if let Some(speed) = self.speed {
            config = config.with_initial_speed(speed);
        }
        if let Some(delay) = self.resume_delay_ms.and_then(millis_to_duration) {
            config = config.with_resume_delay(delay);
        }
        if let Some(px) = self.line_height {
            config = config.with_line_height(px);
        }
        let forward = self.forward_label.unwrap_or_else(|| config.forward_label.clone());
        let reverse = self.reverse_label.unwrap_or_else(|| config.reverse_label.clone());
        config = config.with_labels(forward, reverse);

        let defaults = Selectors::default();
        let pick = |value: Option<String>, kind: ControlKind| {
            value
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| defaults.get(kind).to_owned())
        };
        let raw = self.selectors;
        let selectors = Selectors {
            play: pick(raw.play, ControlKind::Play),
            pause: pick(raw.pause, ControlKind::Pause),
            reverse: pick(raw.reverse, ControlKind::Reverse),
            speed_input: pick(raw.speed_input, ControlKind::SpeedInput),
            speed_value: pick(raw.speed_value, ControlKind::SpeedValue),
        };

        PrompterOptions { config, selectors }
    }
}

fn millis_to_duration(ms: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(ms / 1000.0).ok()
}
