#![forbid(unsafe_code)]

//! Core: host-independent autoscroll ("teleprompter") controller.
//!
//! # Role in TelePrompt
//! `teleprompt-core` owns the playback state machine. It animates the scroll
//! offset of one container at a user-adjustable speed, with play, pause,
//! reverse, and speed controls, and yields to the scroll wheel: a wheel event
//! pauses playback and, if it was running, resumes it after a quiet period.
//!
//! # Primary responsibilities
//! - **ScrollController**: the Stopped/Running state machine and its frame step.
//! - **PlaybackState**: direction, speed, clamped position, pending handles.
//! - **Host traits**: [`Viewport`] and [`Scheduler`] abstract the container and
//!   the frame/timer primitives, so the same controller runs in a browser
//!   (`teleprompt-web`) and in the deterministic [`sim`] host.
//! - **Controls**: optional child-element bindings and their feedback text.
//!
//! # How it fits in the system
//! The web crate wraps DOM elements, `requestAnimationFrame`, and `setTimeout`
//! in the host traits and forwards DOM events here. Nothing in this crate
//! depends on JS or WASM types.
//!
//! ```
//! use core::time::Duration;
//! use teleprompt_core::{ControllerConfig, sim::SimHarness};
//!
//! let mut h = SimHarness::new(1000.0, 200.0, ControllerConfig::default());
//! h.controller_mut().set_speed(4.0); // 1 px per frame
//! h.controller_mut().play();
//! h.run_frames(9);
//! assert_eq!(h.controller().scroll_position(), 10.0);
//!
//! h.wheel(50.0);
//! assert!(!h.controller().is_running());
//! h.advance(Duration::from_millis(500));
//! assert!(h.controller().is_running());
//! ```

pub mod config;
pub mod controller;
pub mod controls;
pub mod error;
pub mod host;
pub mod sim;
pub mod state;
pub mod wheel;

pub use config::ControllerConfig;
pub use controller::ScrollController;
pub use controls::{ControlEvent, ControlFeedback, ControlKind, Controls};
pub use error::InvalidContainerError;
pub use host::{FrameToken, Scheduler, TimerToken, Viewport};
pub use state::{Direction, PlaybackState};
pub use wheel::{DeltaMode, WheelDelta};
