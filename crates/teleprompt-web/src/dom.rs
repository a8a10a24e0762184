#![forbid(unsafe_code)]

//! DOM implementations of the host traits.
//!
//! [`DomViewport`] wraps the container element. [`DomScheduler`] wraps
//! `requestAnimationFrame` / `setTimeout` on the window and invokes two
//! long-lived callbacks installed by the owner after the shared controller
//! exists. [`Listener`] ties an event listener's closure to its target so it
//! can be removed again.
//!
//! Only compiled on `wasm32` targets.

use core::time::Duration;

use js_sys::Reflect;
use teleprompt_core::{FrameToken, Scheduler, TimerToken, Viewport};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Event, EventTarget, HtmlElement, Window};

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

const SCROLL_STYLES: [(&str, &str); 3] = [
    ("overflow-y", "scroll"),
    ("max-height", "100%"),
    ("scroll-behavior", "auto"),
];

/// The scroll container element.
pub(crate) struct DomViewport {
    element: HtmlElement,
    saved_styles: Vec<(&'static str, String)>,
}

impl DomViewport {
    pub(crate) fn new(element: HtmlElement) -> Self {
        Self {
            element,
            saved_styles: Vec::new(),
        }
    }

    /// Put back the inline styles that `enable_programmatic_scroll` replaced.
    pub(crate) fn restore_styles(&mut self) {
        let style = self.element.style();
        for (property, value) in self.saved_styles.drain(..) {
            let result = if value.is_empty() {
                style.remove_property(property).map(drop)
            } else {
                style.set_property(property, &value)
            };
            if let Err(err) = result {
                tracing::warn!(
                    target: "teleprompt",
                    property,
                    ?err,
                    "failed to restore container style"
                );
            }
        }
    }
}

impl Viewport for DomViewport {
    fn scroll_top(&self) -> f64 {
        // `scrollTop` is fractional on high-DPI displays; the typed binding
        // truncates to i32.
        Reflect::get(&self.element, &"scrollTop".into())
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or_else(|| f64::from(self.element.scroll_top()))
    }

    fn set_scroll_top(&mut self, top: f64) {
        if Reflect::set(&self.element, &"scrollTop".into(), &JsValue::from_f64(top)).is_err() {
            self.element.set_scroll_top(top as i32);
        }
    }

    fn scroll_height(&self) -> f64 {
        f64::from(self.element.scroll_height())
    }

    fn client_height(&self) -> f64 {
        f64::from(self.element.client_height())
    }

    fn enable_programmatic_scroll(&mut self) {
        let style = self.element.style();
        for (property, value) in SCROLL_STYLES {
            let previous = style.get_property_value(property).unwrap_or_default();
            self.saved_styles.push((property, previous));
            if let Err(err) = style.set_property(property, value) {
                tracing::warn!(
                    target: "teleprompt",
                    property,
                    ?err,
                    "failed to set container style"
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// `requestAnimationFrame` / `setTimeout` on the window.
pub(crate) struct DomScheduler {
    window: Window,
    on_frame: Option<Closure<dyn FnMut(f64)>>,
    on_resume: Option<Closure<dyn FnMut()>>,
}

impl DomScheduler {
    pub(crate) fn new(window: Window) -> Self {
        Self {
            window,
            on_frame: None,
            on_resume: None,
        }
    }

    /// Install the frame and resume callbacks. Until this is called, requests
    /// return `None` and nothing fires.
    pub(crate) fn install(
        &mut self,
        on_frame: Closure<dyn FnMut(f64)>,
        on_resume: Closure<dyn FnMut()>,
    ) {
        self.on_frame = Some(on_frame);
        self.on_resume = Some(on_resume);
    }
}

impl Scheduler for DomScheduler {
    fn request_frame(&mut self) -> Option<FrameToken> {
        let callback = self.on_frame.as_ref()?;
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => Some(FrameToken(id)),
            Err(err) => {
                tracing::warn!(target: "teleprompt", ?err, "requestAnimationFrame failed");
                None
            }
        }
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if let Err(err) = self.window.cancel_animation_frame(token.0) {
            tracing::warn!(target: "teleprompt", ?err, "cancelAnimationFrame failed");
        }
    }

    fn set_timeout(&mut self, delay: Duration) -> Option<TimerToken> {
        let callback = self.on_resume.as_ref()?;
        let ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                ms,
            ) {
            Ok(id) => Some(TimerToken(id)),
            Err(err) => {
                tracing::warn!(target: "teleprompt", ?err, "setTimeout failed");
                None
            }
        }
    }

    fn clear_timeout(&mut self, token: TimerToken) {
        self.window.clear_timeout_with_handle(token.0);
    }
}

// ---------------------------------------------------------------------------
// Event listeners
// ---------------------------------------------------------------------------

/// An attached event listener; removed from its target on drop.
pub(crate) struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    /// Attach `handler` to `target` for `event`.
    ///
    /// Passive listeners promise never to call `preventDefault`, which keeps
    /// native wheel scrolling smooth.
    pub(crate) fn attach(
        target: &EventTarget,
        event: &'static str,
        passive: bool,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let callback = self.callback.as_ref().unchecked_ref();
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, callback);
    }
}
