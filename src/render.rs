use crate::config::{FlowerStyle, FxConfig};
use crate::constants::{CENTER_COLOR, LABEL_COLOR, LABEL_FONT};
use crate::core::shape::{self, BEZIER_PETALS};
use crate::core::{FireworkEngine, Particle};
use crate::dom;
use glam::Vec2;
use std::cell::Cell;
use std::f64::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Full-viewport 2D canvas the fireworks are drawn on.
///
/// Drawing happens in CSS pixels; the context transform absorbs the
/// devicePixelRatio so the simulation never sees device pixels.
pub struct FireworksCanvas {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    dpr: f64,
    style: FlowerStyle,
    petal_radius: f64,
    pub labels_ready: Rc<Cell<bool>>,
}

impl FireworksCanvas {
    pub fn attach(document: &web::Document, config: &FxConfig) -> anyhow::Result<Self> {
        let canvas = dom::canvas_by_id(document, &config.canvas_id)?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let mut fc = Self {
            canvas,
            ctx,
            dpr: 1.0,
            style: config.flower_style,
            petal_radius: config.petal_radius,
            labels_ready: Rc::new(Cell::new(false)),
        };
        fc.resize();
        Ok(fc)
    }

    pub fn resize(&mut self) {
        self.dpr = dom::sync_canvas_backing_size(&self.canvas);
        _ = self.ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0);
    }

    /// Canvas size in CSS pixels.
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(
            (self.canvas.width() as f64 / self.dpr) as f32,
            (self.canvas.height() as f64 / self.dpr) as f32,
        )
    }

    pub fn draw(&self, engine: &FireworkEngine) {
        let vp = self.viewport();
        self.ctx.clear_rect(0.0, 0.0, vp.x as f64, vp.y as f64);
        let lifespan = engine.config.particle_lifespan.max(f32::EPSILON);
        for fw in engine.fireworks() {
            if !fw.exploded {
                self.draw_particle(&fw.ascent, fw.label, 1.0, self.petal_radius);
                continue;
            }
            for p in fw.children.iter() {
                let alpha = (p.lifespan / lifespan).clamp(0.0, 1.0) as f64;
                let size = self.petal_radius * (0.5 + 0.5 * alpha);
                self.draw_particle(p, fw.label, alpha, size);
            }
        }
        self.ctx.set_global_alpha(1.0);
    }

    // Canvas errors are ignored: a missed petal only leaves the frame incomplete.
    fn draw_particle(&self, p: &Particle, label: char, alpha: f64, size: f64) {
        let ctx = &self.ctx;
        ctx.save();
        _ = ctx.translate(p.position.x as f64, p.position.y as f64);
        _ = ctx.rotate(p.rotation as f64);
        ctx.set_global_alpha(alpha);
        ctx.set_fill_style_str(&rgb(p.color));
        match self.style {
            FlowerStyle::Petals => {
                let flower = shape::petal_flower(size);
                for petal in flower.petals.iter() {
                    fill_circle(ctx, petal.center.x, petal.center.y, petal.radius);
                }
                ctx.set_fill_style_str(&rgb(CENTER_COLOR));
                fill_circle(ctx, 0.0, 0.0, flower.center.radius);
            }
            FlowerStyle::Bezier => {
                ctx.begin_path();
                for petal in shape::bezier_flower(size, BEZIER_PETALS) {
                    ctx.move_to(0.0, 0.0);
                    ctx.bezier_curve_to(
                        petal.c1.x, petal.c1.y, petal.c2.x, petal.c2.y, petal.tip.x, petal.tip.y,
                    );
                    ctx.bezier_curve_to(petal.c3.x, petal.c3.y, petal.c4.x, petal.c4.y, 0.0, 0.0);
                }
                ctx.fill();
                ctx.set_fill_style_str(&rgb(CENTER_COLOR));
                fill_circle(ctx, 0.0, 0.0, shape::center_radius(size));
            }
        }
        if self.labels_ready.get() {
            // label stays upright regardless of spin
            _ = ctx.rotate(-(p.rotation as f64));
            ctx.set_font(LABEL_FONT);
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");
            ctx.set_fill_style_str(LABEL_COLOR);
            let mut buf = [0u8; 4];
            _ = ctx.fill_text(label.encode_utf8(&mut buf), 0.0, 0.0);
        }
        ctx.restore();
    }
}

#[inline]
fn fill_circle(ctx: &web::CanvasRenderingContext2d, x: f64, y: f64, r: f64) {
    ctx.begin_path();
    _ = ctx.arc(x, y, r.max(0.0), 0.0, TAU);
    ctx.fill();
}

#[inline]
fn rgb(c: [u8; 3]) -> String {
    crate::core::css_rgb(c)
}
