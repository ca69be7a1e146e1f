//! Canvas 2D implementation of the drawing surface.

use crate::css;
use crate::dom;
use nebula_core::surface::Stops;
use nebula_core::{CompositeMode, Paint, Surface};
use std::f64::consts::TAU;
use web_sys as web;

pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// `None` when the canvas has no usable 2D context.
    pub fn new(canvas: web::HtmlCanvasElement) -> Option<Self> {
        let ctx = dom::context_2d(&canvas)?;
        Some(Self { canvas, ctx })
    }

    // Returns false when the paint cannot be expressed (e.g. the gradient was rejected).
    fn apply_paint(&self, paint: &Paint) -> bool {
        match paint {
            Paint::Solid(color) => {
                self.ctx.set_fill_style_str(&css::rgba(*color));
                true
            }
            Paint::Radial { radius, stops } => {
                let gradient = match self
                    .ctx
                    .create_radial_gradient(0.0, 0.0, 0.0, 0.0, 0.0, (*radius).max(0.0) as f64)
                {
                    Ok(g) => g,
                    Err(_) => return false,
                };
                add_stops(&gradient, stops);
                self.ctx.set_fill_style_canvas_gradient(&gradient);
                true
            }
            Paint::Linear { from, to, stops } => {
                let gradient = self.ctx.create_linear_gradient(
                    from.x as f64,
                    from.y as f64,
                    to.x as f64,
                    to.y as f64,
                );
                add_stops(&gradient, stops);
                self.ctx.set_fill_style_canvas_gradient(&gradient);
                true
            }
        }
    }
}

fn add_stops(gradient: &web::CanvasGradient, stops: &Stops) {
    for stop in stops {
        let _ = gradient.add_color_stop(stop.offset, &css::rgba(stop.color));
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        let _ = self.ctx.set_global_composite_operation(mode.as_css());
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn reset_transform(&mut self) {
        let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
    }

    fn translate(&mut self, x: f32, y: f32) {
        let _ = self.ctx.translate(x as f64, y as f64);
    }

    fn rotate(&mut self, radians: f32) {
        let _ = self.ctx.rotate(radians as f64);
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        let _ = self.ctx.scale(sx as f64, sy as f64);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, paint: &Paint) {
        if self.apply_paint(paint) {
            self.ctx
                .fill_rect(x as f64, y as f64, width as f64, height as f64);
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint) {
        if radius.is_nan() || radius <= 0.0 || !self.apply_paint(paint) {
            return;
        }
        self.ctx.begin_path();
        let _ = self.ctx.arc(cx as f64, cy as f64, radius as f64, 0.0, TAU);
        self.ctx.fill();
    }
}
