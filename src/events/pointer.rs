use crate::core::PageSignals;
use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// The fireworks canvas is fixed and full-viewport, so client coordinates are
// canvas CSS pixels.
#[inline]
pub fn pointer_position(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

pub fn wire_pointer(window: &web::Window, signals: &PageSignals) {
    wire_mousemove(window, signals);
    wire_click(window, signals);
}

fn wire_mousemove(window: &web::Window, signals: &PageSignals) {
    let pointer_move = signals.pointer_move.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        pointer_move.emit(&pointer_position(&ev));
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_click(window: &web::Window, signals: &PageSignals) {
    let click = signals.click.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        click.emit(&pointer_position(&ev));
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}
