#![forbid(unsafe_code)]

//! WASM front end for TelePrompt.
//!
//! This crate exports [`TelePrompter`], a `wasm-bindgen` class that binds a
//! [`teleprompt_core::ScrollController`] to a DOM container. The browser
//! drives it: `requestAnimationFrame` delivers frames, `setTimeout` delivers
//! the wheel quiet-period resume, and `click` / `input` / `wheel` listeners
//! forward user input.
//!
//! Option parsing lives in [`options`] and is platform independent; the DOM
//! glue compiles only on `wasm32`.

pub mod options;

#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::TelePrompter;

pub use options::{PrompterOptions, RawOptions, RawSelectors, Selectors};
