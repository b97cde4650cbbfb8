use crate::core::{FireworkEngine, PageSignals, ScrollEngine, Subscription};
use crate::events::keyboard::{debug_key_for, DebugKey};
use crate::render::FireworksCanvas;
use crate::scroll_dom::{self, ScrollLayers};
use glam::Vec2;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Fireworks engine plus the canvas it draws to.
pub struct Fireworks {
    pub engine: Rc<RefCell<FireworkEngine>>,
    pub canvas: Rc<RefCell<FireworksCanvas>>,
    /// Auto-spawn stops once this element's top reaches the viewport top.
    pub stop_at: Option<web::HtmlElement>,
}

/// Scroll engine plus the elements it positions.
pub struct Scroll {
    pub engine: Rc<RefCell<ScrollEngine>>,
    pub layers: Rc<RefCell<ScrollLayers>>,
}

pub struct FrameContext {
    pub fireworks: Option<Fireworks>,
    pub scroll: Option<Scroll>,
    pub paused: Rc<Cell<bool>>,
    pub clock: Instant,
    subscriptions: Vec<Subscription>,
}

impl FrameContext {
    pub fn new(fireworks: Option<Fireworks>, scroll: Option<Scroll>) -> Self {
        Self {
            fireworks,
            scroll,
            paused: Rc::new(Cell::new(false)),
            clock: Instant::now(),
            subscriptions: Vec::new(),
        }
    }

    #[inline]
    fn now_ms(clock: Instant) -> f64 {
        clock.elapsed().as_secs_f64() * 1000.0
    }

    /// Route page signals into the engines. The subscriptions are owned by
    /// this context and end with it.
    pub fn subscribe(&mut self, signals: &PageSignals) {
        let clock = self.clock;
        if let Some(s) = &self.scroll {
            let engine = s.engine.clone();
            self.subscriptions.push(signals.scroll.subscribe(move |y| {
                engine.borrow_mut().on_scroll(*y, Self::now_ms(clock));
            }));
            let engine = s.engine.clone();
            let layers = s.layers.clone();
            self.subscriptions.push(signals.resize.subscribe(move |_| {
                let y = web::window().map(|w| scroll_dom::read_scroll_y(&w)).unwrap_or(0.0);
                layers.borrow_mut().remeasure(&mut engine.borrow_mut(), y);
            }));
        }
        if let Some(f) = &self.fireworks {
            let engine = f.engine.clone();
            self.subscriptions.push(signals.pointer_move.subscribe(move |pos| {
                let removed = engine.borrow_mut().sweep(*pos);
                if removed > 0 {
                    log::debug!("[fx] swept {} particle(s)", removed);
                }
            }));
            let engine = f.engine.clone();
            self.subscriptions.push(signals.click.subscribe(move |pos| {
                engine.borrow_mut().on_click(*pos);
            }));
            let canvas = f.canvas.clone();
            self.subscriptions.push(signals.resize.subscribe(move |_| {
                canvas.borrow_mut().resize();
            }));
            let engine = f.engine.clone();
            let canvas = f.canvas.clone();
            let paused = self.paused.clone();
            self.subscriptions.push(signals.key.subscribe(move |key| match debug_key_for(key) {
                Some(DebugKey::Burst) => {
                    let vp = canvas.borrow().viewport();
                    engine.borrow_mut().spawn_at(Vec2::new(vp.x * 0.5, vp.y));
                }
                Some(DebugKey::TogglePause) => {
                    paused.set(!paused.get());
                    log::info!("[keys] paused={}", paused.get());
                }
                None => {}
            }));
        }
    }

    pub fn frame(&mut self) {
        if let Some(f) = &self.fireworks {
            if !self.paused.get() {
                let allowed = f
                    .stop_at
                    .as_ref()
                    .map(|el| el.get_bounding_client_rect().top() > 0.0)
                    .unwrap_or(true);
                let vp = f.canvas.borrow().viewport();
                f.engine.borrow_mut().step(vp, allowed);
            }
            f.canvas.borrow().draw(&f.engine.borrow());
        }
        if let Some(s) = &self.scroll {
            let frames = s.engine.borrow_mut().frame(Self::now_ms(self.clock));
            s.layers.borrow().apply(&frames);
        }
    }
}

/// Handle to the running requestAnimationFrame loop.
pub struct FrameLoop {
    raf_id: Rc<Cell<Option<i32>>>,
    stopped: Rc<Cell<bool>>,
}

impl FrameLoop {
    /// Cancel the pending frame; the loop does not reschedule itself after this.
    pub fn stop(&self) {
        self.stopped.set(true);
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        log::info!("frame loop stopped");
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> FrameLoop {
    let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let stopped = Rc::new(Cell::new(false));
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let raf_tick = raf_id.clone();
    let stopped_tick = stopped.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if stopped_tick.get() {
            return;
        }
        frame_ctx.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            raf_tick.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        raf_id.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
    }
    FrameLoop { raf_id, stopped }
}
