//! DOM listeners that translate browser events into [`PageSignals`].
//!
//! Listeners live for the page's lifetime (`Closure::forget`); components
//! attach and detach through signal subscriptions instead.

pub mod keyboard;
pub mod pointer;

use crate::core::PageSignals;
use crate::scroll_dom;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_page_events(window: &web::Window, signals: &PageSignals) {
    wire_scroll(window, signals);
    wire_resize(window, signals);
    pointer::wire_pointer(window, signals);
    keyboard::wire_keydown(window, signals);
}

fn wire_scroll(window: &web::Window, signals: &PageSignals) {
    let scroll = signals.scroll.clone();
    let win = window.clone();
    let closure = Closure::wrap(Box::new(move || {
        scroll.emit(&scroll_dom::read_scroll_y(&win));
    }) as Box<dyn FnMut()>);
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(true);
    _ = window.add_event_listener_with_callback_and_add_event_listener_options(
        "scroll",
        closure.as_ref().unchecked_ref(),
        &opts,
    );
    closure.forget();
}

fn wire_resize(window: &web::Window, signals: &PageSignals) {
    let resize = signals.resize.clone();
    let win = window.clone();
    let closure = Closure::wrap(Box::new(move || {
        let w = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        resize.emit(&(w, h));
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}
