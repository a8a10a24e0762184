#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the TelePrompter.
//!
//! Wraps [`teleprompt_core::ScrollController`] over the DOM host types from
//! [`crate::dom`]. The controller lives in an `Rc<RefCell<_>>`; every
//! callback the browser holds (frame, resume timer, listeners) captures only a
//! `Weak` to it, so dropping the [`TelePrompter`] frees everything.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Reflect;
use teleprompt_core::{
    ControlEvent, ControlFeedback, ControlKind, Controls, DeltaMode, InvalidContainerError,
    ScrollController, WheelDelta,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, HtmlElement, HtmlInputElement, WheelEvent};

use crate::console::{init_console_logging, install_panic_hook};
use crate::dom::{DomScheduler, DomViewport, Listener};
use crate::options::{PrompterOptions, RawOptions, selector_keys};

type Controller = ScrollController<DomViewport, DomScheduler>;
type Shared = Rc<RefCell<Controller>>;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

/// Autoscroll controller bound to one container element.
///
/// ```js
/// const prompter = new TelePrompter(document.querySelector("#monkieprompter"), { speed: 2 });
/// prompter.play();
/// ```
#[wasm_bindgen]
pub struct TelePrompter {
    shared: Shared,
    controls: Rc<Controls<Element>>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl TelePrompter {
    /// Bind to `container`. Throws when `container` is null or undefined.
    ///
    /// Control elements (`#mtp-play`, `#mtp-pause`, `#mtp-reverse`,
    /// `#mtp-speed`, `#speed-value`, or the selectors given in `options`) are
    /// looked up inside the container; any of them may be missing.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: Option<HtmlElement>,
        options: Option<JsValue>,
    ) -> Result<TelePrompter, JsValue> {
        install_panic_hook();
        let options = read_options(options.as_ref()).into_options();
        let Some(container) = container else {
            return Err(container_error());
        };
        let window = web_sys::window().ok_or_else(|| js_error("no global window"))?;
        Self::build(container, window, options)
    }

    /// Bind to the first element in `document` matching `selector`.
    #[wasm_bindgen(js_name = fromSelector)]
    pub fn from_selector(
        selector: &str,
        options: Option<JsValue>,
    ) -> Result<TelePrompter, JsValue> {
        let container = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.query_selector(selector).ok().flatten())
            .and_then(|e| e.dyn_into::<HtmlElement>().ok());
        Self::new(container, options)
    }

    /// Start autoscrolling. No-op while already running.
    pub fn play(&self) {
        self.with_controller(Controller::play);
    }

    /// Stop autoscrolling and cancel a pending wheel resume.
    pub fn pause(&self) {
        self.with_controller(Controller::pause);
    }

    /// Toggle direction and refresh the reverse control's label.
    pub fn reverse(&self) {
        let feedback = self.dispatch(ControlEvent::Reverse);
        apply_feedback(&self.controls, &feedback);
    }

    /// Set the speed in user units (pixels per frame = `value` × multiplier).
    #[wasm_bindgen(js_name = setSpeed)]
    pub fn set_speed(&self, value: f64) {
        self.with_controller(|c| c.set_speed(value));
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.shared.borrow().is_running()
    }

    #[wasm_bindgen(js_name = isReversed)]
    pub fn is_reversed(&self) -> bool {
        self.shared.borrow().is_reversed()
    }

    /// Effective pixels per frame.
    pub fn speed(&self) -> f64 {
        self.shared.borrow().speed()
    }

    #[wasm_bindgen(js_name = scrollPosition)]
    pub fn scroll_position(&self) -> f64 {
        self.shared.borrow().scroll_position()
    }

    /// Stop playback and detach every listener. The instance is inert
    /// afterwards.
    pub fn destroy(&mut self) {
        self.with_controller(Controller::pause);
        self.listeners.clear();
    }
}

impl TelePrompter {
    fn build(
        container: HtmlElement,
        window: web_sys::Window,
        options: PrompterOptions,
    ) -> Result<TelePrompter, JsValue> {
        let PrompterOptions { config, selectors } = options;
        let debug = config.debug;
        if debug {
            init_console_logging();
        }

        let controls = Rc::new(Controls::bind(|kind| {
            container.query_selector(selectors.get(kind)).ok().flatten()
        }));

        let controller = ScrollController::new(
            Some(DomViewport::new(container.clone())),
            DomScheduler::new(window),
            config,
        )
        .map_err(|err| js_error(&err.to_string()))?;
        let shared: Shared = Rc::new(RefCell::new(controller));
        install_callbacks(&shared);

        let listeners = match attach_listeners(&shared, &controls, &container) {
            Ok(listeners) => listeners,
            Err(err) => {
                shared.borrow_mut().viewport_mut().restore_styles();
                return Err(err);
            }
        };

        if debug {
            tracing::debug!(
                target: "teleprompt",
                bound = controls.bound_count(),
                "controls bound"
            );
        }

        Ok(TelePrompter {
            shared,
            controls,
            listeners,
        })
    }

    fn with_controller<R>(&self, f: impl FnOnce(&mut Controller) -> R) -> Option<R> {
        match self.shared.try_borrow_mut() {
            Ok(mut c) => Some(f(&mut c)),
            Err(_) => {
                tracing::warn!(target: "teleprompt", "controller busy; call ignored");
                None
            }
        }
    }

    fn dispatch(&self, event: ControlEvent) -> ControlFeedback {
        self.with_controller(|c| c.dispatch(event)).unwrap_or_default()
    }
}

impl Drop for TelePrompter {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Attach the control and wheel listeners. On error, the listeners attached
/// so far are dropped and therefore removed.
fn attach_listeners(
    shared: &Shared,
    controls: &Rc<Controls<Element>>,
    container: &HtmlElement,
) -> Result<Vec<Listener>, JsValue> {
    let mut listeners = Vec::new();
    for (kind, element) in controls.iter() {
        let Some(event) = kind.event_name() else {
            continue;
        };
        let weak = Rc::downgrade(shared);
        let controls_ref = Rc::downgrade(controls);
        let handler = move |e: Event| {
            let Some(control) = control_event(kind, &e) else {
                return;
            };
            let Some(feedback) = with_weak(&weak, |c| c.dispatch(control)) else {
                return;
            };
            if let Some(controls) = controls_ref.upgrade() {
                apply_feedback(&controls, &feedback);
            }
        };
        listeners.push(Listener::attach(element, event, false, handler)?);
    }

    let weak = Rc::downgrade(shared);
    listeners.push(Listener::attach(container, "wheel", true, move |e: Event| {
        let Some(wheel) = e.dyn_ref::<WheelEvent>() else {
            return;
        };
        let mode = DeltaMode::from_dom(wheel.delta_mode());
        let delta = WheelDelta::new(wheel.delta_y(), mode);
        with_weak(&weak, |c| c.on_wheel(delta));
    })?);
    Ok(listeners)
}

/// Wire the scheduler's frame and resume callbacks back to the controller.
fn install_callbacks(shared: &Shared) {
    let weak = Rc::downgrade(shared);
    let on_frame = Closure::wrap(Box::new(move |_timestamp: f64| {
        with_weak(&weak, |c| {
            if let Some(token) = c.state().frame_token() {
                c.on_frame(token);
            }
        });
    }) as Box<dyn FnMut(f64)>);

    let weak = Rc::downgrade(shared);
    let on_resume = Closure::wrap(Box::new(move || {
        with_weak(&weak, |c| {
            if let Some(token) = c.state().resume_token() {
                c.on_resume_timer(token);
            }
        });
    }) as Box<dyn FnMut()>);

    shared.borrow_mut().scheduler_mut().install(on_frame, on_resume);
}

fn with_weak<R>(
    weak: &Weak<RefCell<Controller>>,
    f: impl FnOnce(&mut Controller) -> R,
) -> Option<R> {
    let shared = weak.upgrade()?;
    let mut controller = shared.try_borrow_mut().ok()?;
    Some(f(&mut controller))
}

/// Translate a DOM event on a control element into a [`ControlEvent`].
fn control_event(kind: ControlKind, event: &Event) -> Option<ControlEvent> {
    match kind {
        ControlKind::Play => Some(ControlEvent::Play),
        ControlKind::Pause => Some(ControlEvent::Pause),
        ControlKind::Reverse => Some(ControlEvent::Reverse),
        ControlKind::SpeedInput => {
            let value = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.value())
                .unwrap_or_default();
            Some(ControlEvent::SpeedInput(value))
        }
        ControlKind::SpeedValue => None,
    }
}

fn apply_feedback(controls: &Controls<Element>, feedback: &ControlFeedback) {
    if let (Some(label), Some(el)) = (&feedback.reverse_label, &controls.reverse) {
        el.set_inner_html(label);
    }
    if let (Some(text), Some(el)) = (&feedback.speed_display, &controls.speed_value) {
        el.set_inner_html(text);
    }
}

// ---------------------------------------------------------------------------
// Options / errors
// ---------------------------------------------------------------------------

fn read_options(options: Option<&JsValue>) -> RawOptions {
    let Some(obj) = options.filter(|o| o.is_object()) else {
        return RawOptions::default();
    };
    let mut raw = RawOptions {
        debug: parse_bool(obj, &["debug"]),
        speed: parse_f64(obj, &["speed"]),
        multiplier: parse_f64(obj, &["multiplier"]),
        resume_delay_ms: parse_f64(obj, &["resumeDelayMs", "resume_delay_ms"]),
        line_height: parse_f64(obj, &["lineHeight", "line_height"]),
        forward_label: parse_string(obj, &["forwardLabel", "forward_label"]),
        reverse_label: parse_string(obj, &["reverseLabel", "reverse_label"]),
        ..Default::default()
    };
    if let Some(selectors) = lookup(obj, &["selectors"]).filter(JsValue::is_object) {
        for kind in ControlKind::ALL {
            *raw.selectors.slot_mut(kind) = parse_string(&selectors, selector_keys(kind));
        }
    }
    raw
}

fn lookup(obj: &JsValue, keys: &[&str]) -> Option<JsValue> {
    keys.iter()
        .filter_map(|key| Reflect::get(obj, &JsValue::from_str(key)).ok())
        .find(|v| !v.is_undefined() && !v.is_null())
}

fn parse_bool(obj: &JsValue, keys: &[&str]) -> Option<bool> {
    lookup(obj, keys).and_then(|v| v.as_bool())
}

fn parse_f64(obj: &JsValue, keys: &[&str]) -> Option<f64> {
    lookup(obj, keys).and_then(|v| v.as_f64())
}

fn parse_string(obj: &JsValue, keys: &[&str]) -> Option<String> {
    lookup(obj, keys).and_then(|v| v.as_string())
}

fn container_error() -> JsValue {
    js_error(&InvalidContainerError.to_string())
}

fn js_error(msg: &str) -> JsValue {
    js_sys::Error::new(msg).into()
}
