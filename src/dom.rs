use crate::config::FxConfig;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub const CONFIG_ELEMENT_ID: &str = "petalfx-config";

#[inline]
pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("#{} is not a canvas: {:?}", id, e)))
}

#[inline]
pub fn html_element(document: &web::Document, selector: &str) -> Option<web::HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

/// Match the canvas backing store to its CSS size times devicePixelRatio.
/// Returns the ratio used so drawing can be scaled back to CSS pixels.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> f64 {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let rect = canvas.get_bounding_client_rect();
    let w_px = (rect.width() * dpr) as u32;
    let h_px = (rect.height() * dpr) as u32;
    canvas.set_width(w_px.max(1));
    canvas.set_height(h_px.max(1));
    dpr
}

/// Read the optional JSON config block. Anything missing or broken falls back
/// to defaults; the effects are decorative and must still start.
pub fn load_config(document: &web::Document) -> FxConfig {
    let Some(el) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return FxConfig::default();
    };
    let text = el.text_content().unwrap_or_default();
    if text.trim().is_empty() {
        return FxConfig::default();
    }
    match FxConfig::from_json(&text) {
        Ok(cfg) => {
            log::info!("[config] loaded #{}", CONFIG_ELEMENT_ID);
            cfg
        }
        Err(e) => {
            log::warn!("[config] {}; using defaults", e);
            FxConfig::default()
        }
    }
}

/// Resolve once web fonts are usable so label glyphs don't flash in a
/// fallback face. Returns immediately when the FontFaceSet API is missing.
pub async fn fonts_ready(document: &web::Document) {
    let has_fonts = js_sys::Reflect::has(document.as_ref(), &"fonts".into()).unwrap_or(false);
    if !has_fonts {
        return;
    }
    match document.fonts().ready() {
        Ok(promise) => {
            if let Err(e) = JsFuture::from(promise).await {
                log::warn!("[fonts] ready rejected: {:?}", e);
            }
        }
        Err(e) => log::warn!("[fonts] ready unavailable: {:?}", e),
    }
}
