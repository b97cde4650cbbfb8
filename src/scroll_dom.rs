use crate::config::{FxConfig, LayerConfig};
use crate::core::{css_rgb, resolve_scroll_offset, LayerFrame, LayerId, ScrollEngine};
use crate::dom;
use web_sys as web;

/// Current page scroll offset via the usual fallback chain.
pub fn read_scroll_y(window: &web::Window) -> f64 {
    let document = window.document();
    let doc_el = document.as_ref().and_then(|d| d.document_element());
    let body = document.as_ref().and_then(|d| d.body());
    resolve_scroll_offset(&[
        window.page_y_offset().ok(),
        window.scroll_y().ok(),
        doc_el.map(|e| e.scroll_top() as f64),
        body.map(|b| b.scroll_top() as f64),
    ])
}

struct Tracked {
    id: LayerId,
    element: web::HtmlElement,
    config: LayerConfig,
}

/// The DOM side of the scroll engine: finds each configured element,
/// measures it, and writes the engine's per-frame output back to it.
pub struct ScrollLayers {
    tracked: Vec<Tracked>,
}

impl ScrollLayers {
    /// Missing elements or rejected layers are logged and skipped.
    pub fn attach(document: &web::Document, config: &FxConfig, engine: &mut ScrollEngine) -> Self {
        let scroll_y = web::window().map(|w| read_scroll_y(&w)).unwrap_or(0.0);
        let mut tracked = Vec::new();
        for layer in &config.layers {
            let Some(element) = dom::html_element(document, &layer.selector) else {
                log::warn!("[scroll] no element for '{}'", layer.selector);
                continue;
            };
            if let Some(id) = register(engine, layer, &element, scroll_y) {
                tracked.push(Tracked {
                    id,
                    element,
                    config: layer.clone(),
                });
            }
        }
        engine.snap(scroll_y);
        log::info!("[scroll] tracking {} layer(s)", tracked.len());
        Self { tracked }
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    /// Re-measure every element (after a resize) and reset to the current
    /// scroll position.
    pub fn remeasure(&mut self, engine: &mut ScrollEngine, scroll_y: f64) {
        for t in self.tracked.iter_mut() {
            // measure the element where it would sit without our offset
            let applied = engine
                .layer(t.id)
                .map(|l| l.current_offset.round())
                .unwrap_or(0.0);
            engine.remove_layer(t.id);
            match register(engine, &t.config, &t.element, scroll_y - applied) {
                Some(id) => t.id = id,
                None => log::warn!("[scroll] dropped '{}' after resize", t.config.selector),
            }
        }
        self.tracked.retain(|t| engine.layer(t.id).is_some());
        engine.snap(scroll_y);
    }

    pub fn apply(&self, frames: &[LayerFrame]) {
        for frame in frames {
            let Some(t) = self.tracked.iter().find(|t| t.id == frame.id) else {
                continue;
            };
            let style = t.element.style();
            _ = style.set_property("top", &format!("{}px", frame.offset_px));
            if let Some(bg) = frame.background {
                _ = style.set_property("background-color", &css_rgb(bg));
            }
        }
    }
}

fn register(
    engine: &mut ScrollEngine,
    layer: &LayerConfig,
    element: &web::HtmlElement,
    scroll_y: f64,
) -> Option<LayerId> {
    let rect = element.get_bounding_client_rect();
    let spec = layer.resolve(rect.top() + scroll_y, rect.height());
    match engine.add_layer(spec) {
        Ok(id) => Some(id),
        Err(e) => {
            log::warn!("[scroll] {}", e);
            None
        }
    }
}
