#![cfg(target_arch = "wasm32")]
use crate::config::FxConfig;
use crate::core::{FireworkEngine, PageSignals, ScrollEngine};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub mod config;
pub mod constants;
pub mod core;
mod dom;
mod events;
mod frame;
mod render;
mod scroll_dom;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("petalfx starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn entropy_seed() -> u64 {
    let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (hi << 32) | lo
}

fn build_fireworks(document: &web::Document, config: &FxConfig) -> Option<frame::Fireworks> {
    let canvas = match render::FireworksCanvas::attach(document, config) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("[fx] disabled: {:?}", e);
            return None;
        }
    };
    let stop_at = config
        .spawn_stop_selector
        .as_deref()
        .and_then(|sel| dom::html_element(document, sel));
    let engine = FireworkEngine::new(config.particles.clone(), entropy_seed());
    log::info!(
        "[fx] canvas #{} ready, style={:?}",
        config.canvas_id,
        config.flower_style
    );
    Some(frame::Fireworks {
        engine: Rc::new(RefCell::new(engine)),
        canvas: Rc::new(RefCell::new(canvas)),
        stop_at,
    })
}

fn build_scroll(document: &web::Document, config: &FxConfig) -> Option<frame::Scroll> {
    let mut engine = ScrollEngine::new(config.scroll);
    let layers = scroll_dom::ScrollLayers::attach(document, config, &mut engine);
    if layers.is_empty() {
        return None;
    }
    Some(frame::Scroll {
        engine: Rc::new(RefCell::new(engine)),
        layers: Rc::new(RefCell::new(layers)),
    })
}

fn wire_pagehide(window: &web::Window, frame_loop: frame::FrameLoop) {
    let closure: Closure<dyn FnMut()> = Closure::once(move || frame_loop.stop());
    _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    closure.forget();
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let config = dom::load_config(&document);
    let fireworks = build_fireworks(&document, &config);
    let scroll = build_scroll(&document, &config);
    if fireworks.is_none() && scroll.is_none() {
        log::warn!("nothing to animate on this page");
        return Ok(());
    }
    let labels_ready = fireworks.as_ref().map(|f| f.canvas.borrow().labels_ready.clone());

    let signals = PageSignals::default();
    events::wire_page_events(&window, &signals);

    let mut ctx = frame::FrameContext::new(fireworks, scroll);
    ctx.subscribe(&signals);
    let frame_loop = frame::start_loop(Rc::new(RefCell::new(ctx)));
    wire_pagehide(&window, frame_loop);

    // Petals animate right away; labels wait for the web font.
    if let Some(flag) = labels_ready {
        dom::fonts_ready(&document).await;
        flag.set(true);
        log::info!("[fx] fonts ready");
    }
    Ok(())
}
