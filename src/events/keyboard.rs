use crate::core::PageSignals;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Developer hotkeys understood by the frame loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DebugKey {
    /// Launch one firework from the bottom centre of the viewport.
    Burst,
    /// Pause or resume the particle animation.
    TogglePause,
}

#[inline]
pub fn debug_key_for(key: &str) -> Option<DebugKey> {
    match key {
        "b" | "B" => Some(DebugKey::Burst),
        "p" | "P" => Some(DebugKey::TogglePause),
        _ => None,
    }
}

#[inline]
fn is_typing_target(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .map(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT"))
        .unwrap_or(false)
}

pub fn wire_keydown(window: &web::Window, signals: &PageSignals) {
    let key = signals.key.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if ev.ctrl_key() || ev.meta_key() || ev.alt_key() || is_typing_target(&ev) {
            return;
        }
        key.emit(&ev.key());
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}
