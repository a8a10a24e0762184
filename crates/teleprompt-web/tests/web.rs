//! In-browser tests for the DOM bindings.
//!
//! Run with `wasm-pack test --headless --firefox crates/teleprompt-web`.

#![cfg(target_arch = "wasm32")]

use teleprompt_web::TelePrompter;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlElement, HtmlInputElement, WheelEvent, WheelEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window()
        .and_then(|w| w.document())
        .expect("document")
}

/// A 200px-tall container with 1000px of content and the given inner markup.
fn container(controls: &str) -> HtmlElement {
    let doc = document();
    let el: HtmlElement = doc
        .create_element("div")
        .expect("create div")
        .dyn_into()
        .expect("HtmlElement");
    el.set_inner_html(&format!(
        r#"{controls}<div style="height: 1000px">script</div>"#
    ));
    el.style().set_property("height", "200px").expect("height");
    doc.body().expect("body").append_child(&el).expect("append");
    el
}

fn child(parent: &HtmlElement, selector: &str) -> HtmlElement {
    parent
        .query_selector(selector)
        .expect("query")
        .expect("present")
        .dyn_into()
        .expect("HtmlElement")
}

#[wasm_bindgen_test]
fn null_container_throws() {
    let err = TelePrompter::new(None, None).err().expect("must fail");
    let msg = err
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .unwrap_or_default();
    assert!(msg.starts_with("container not found"), "{msg}");
}

#[wasm_bindgen_test]
fn missing_selector_throws() {
    assert!(TelePrompter::from_selector("#does-not-exist", None).is_err());
}

#[wasm_bindgen_test]
fn construction_styles_container() {
    let el = container("");
    let _prompter = TelePrompter::new(Some(el.clone()), None).expect("bind");
    let style = el.style();
    assert_eq!(style.get_property_value("overflow-y").unwrap(), "scroll");
    assert_eq!(style.get_property_value("scroll-behavior").unwrap(), "auto");
}

#[wasm_bindgen_test]
fn controls_are_optional() {
    let el = container(r#"<button id="mtp-play">Play</button>"#);
    let prompter = TelePrompter::new(Some(el.clone()), None).expect("bind");
    child(&el, "#mtp-play").click();
    assert!(prompter.is_running());
    prompter.pause();
    assert!(!prompter.is_running());
}

#[wasm_bindgen_test]
fn buttons_drive_playback_and_labels() {
    let el = container(
        r#"<button id="mtp-play">Play</button>
           <button id="mtp-pause">Pause</button>
           <button id="mtp-reverse">Reverse</button>"#,
    );
    let prompter = TelePrompter::new(Some(el.clone()), None).expect("bind");

    child(&el, "#mtp-play").click();
    assert!(prompter.is_running());
    assert_eq!(prompter.scroll_position(), 0.25);

    let reverse = child(&el, "#mtp-reverse");
    reverse.click();
    assert!(prompter.is_reversed());
    assert_eq!(reverse.inner_html(), "⬇️Forward");
    reverse.click();
    assert_eq!(reverse.inner_html(), "⬆️Reverse");

    child(&el, "#mtp-pause").click();
    assert!(!prompter.is_running());
}

#[wasm_bindgen_test]
fn speed_input_updates_speed_and_display() {
    let el = container(
        r#"<input id="mtp-speed" type="range" min="1" max="10" value="1">
           <span id="speed-value">1</span>"#,
    );
    let prompter = TelePrompter::new(Some(el.clone()), None).expect("bind");

    let input: HtmlInputElement = child(&el, "#mtp-speed").dyn_into().expect("input");
    input.set_value("8");
    input
        .dispatch_event(&Event::new("input").expect("event"))
        .expect("dispatch");

    assert_eq!(prompter.speed(), 2.0);
    assert_eq!(child(&el, "#speed-value").inner_html(), "8");
}

#[wasm_bindgen_test]
fn options_object_is_honoured() {
    let el = container(r#"<button class="go">Go</button>"#);
    let options = js_sys::JSON::parse(
        r#"{"speed": 4, "multiplier": 0.5, "selectors": {"play": ".go"}}"#,
    )
    .expect("json");
    let prompter = TelePrompter::new(Some(el.clone()), Some(options)).expect("bind");
    assert_eq!(prompter.speed(), 2.0);
    child(&el, ".go").click();
    assert!(prompter.is_running());
}

fn dispatch_wheel(target: &HtmlElement, delta_y: f64) {
    let init = WheelEventInit::new();
    init.set_delta_y(delta_y);
    let event = WheelEvent::new_with_event_init_dict("wheel", &init).expect("wheel event");
    target.dispatch_event(&event).expect("dispatch");
}

#[wasm_bindgen_test]
fn wheel_over_container_pauses_and_tracks_delta() {
    let el = container("");
    let prompter = TelePrompter::new(Some(el.clone()), None).expect("bind");
    prompter.play();
    assert!(prompter.is_running());

    dispatch_wheel(&el, 50.0);
    assert!(!prompter.is_running());
    assert_eq!(prompter.scroll_position(), 50.25);
}

#[wasm_bindgen_test]
fn wheel_while_stopped_keeps_playback_stopped() {
    let el = container("");
    let prompter = TelePrompter::new(Some(el.clone()), None).expect("bind");
    dispatch_wheel(&el, 30.0);
    assert!(!prompter.is_running());
    assert_eq!(prompter.scroll_position(), 30.0);
}

#[wasm_bindgen_test]
fn destroy_detaches_listeners() {
    let el = container(r#"<button id="mtp-play">Play</button>"#);
    let mut prompter = TelePrompter::new(Some(el.clone()), None).expect("bind");
    prompter.destroy();
    child(&el, "#mtp-play").click();
    assert!(!prompter.is_running());
}

#[wasm_bindgen_test]
fn set_speed_scales() {
    let el = container("");
    let prompter = TelePrompter::new(Some(el), None).expect("bind");
    prompter.set_speed(4.0);
    assert_eq!(prompter.speed(), 1.0);
}
