#![forbid(unsafe_code)]

//! Browser console plumbing: panic hook and `tracing` output.
//!
//! Only compiled on `wasm32` targets.

use std::io;
use std::sync::Once;

use js_sys::Reflect;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

fn console_call(method: &str, msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(func) = Reflect::get(&console, &method.into()) else {
        return;
    };
    let Ok(func) = func.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = func.call1(&console, &JsValue::from_str(msg));
}

pub(crate) fn console_error(msg: &str) {
    console_call("error", msg);
}

pub(crate) fn install_panic_hook() {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

/// `io::Write` sink that forwards each formatted event to `console.log`.
struct ConsoleWriter;

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let line = String::from_utf8_lossy(buf);
        let line = line.trim_end();
        if !line.is_empty() {
            console_call("log", line);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Install a global `tracing` subscriber that prints to the console.
///
/// Called when a controller is created with `debug: true`. Only the first
/// call installs anything; if the page already set a global subscriber, that
/// one is kept.
pub(crate) fn init_console_logging() {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .without_time()
            .with_writer(|| ConsoleWriter)
            .finish();
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            console_call("warn", "teleprompt: a tracing subscriber is already installed");
        }
    });
}
