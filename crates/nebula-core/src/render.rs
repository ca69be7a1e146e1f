//! Layered compositing of the backdrop: mist (screen), beams (lighter), stars (source-over).
//!
//! The renderer holds no per-frame state: the same field and `t` always
//! produce the same draw calls.

use crate::color::{ColorStop, Rgba};
use crate::constants::*;
use crate::field::{MistBlob, ParticleField, Star};
use crate::surface::{CompositeMode, Paint, Stops, Surface};
use glam::Vec2;
use smallvec::smallvec;

#[derive(Clone, Copy, Debug)]
pub struct Renderer {
    beam_count: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(BEAM_COUNT)
    }
}

impl Renderer {
    pub fn new(beam_count: usize) -> Self {
        Self { beam_count }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, field: &ParticleField, t: f32) {
        let (w, h) = surface.size();
        let (width, height) = (w as f32, h as f32);

        clear(surface, width, height);

        surface.set_composite(CompositeMode::Screen);
        for mist in &field.mists {
            draw_mist(surface, mist);
        }

        surface.set_composite(CompositeMode::Lighter);
        for i in 0..self.beam_count {
            draw_beam(surface, i, t, width, height);
        }

        surface.set_composite(CompositeMode::SourceOver);
        for star in &field.stars {
            draw_star(surface, star, t);
        }
    }
}

/// Twinkle opacity of `star` at time `t`, always in `[0, 1]`.
#[inline]
pub fn star_alpha(star: &Star, t: f32) -> f32 {
    let a = star.base_alpha + (TWINKLE_FREQUENCY * t + star.phase).sin() * TWINKLE_AMPLITUDE;
    if a.is_finite() {
        a.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Geometry of beam `index` at time `t`: (origin, rotation, width).
pub fn beam_geometry(index: usize, t: f32, canvas_width: f32) -> (Vec2, f32, f32) {
    let i = index as f32;
    let origin = Vec2::new(canvas_width / 2.0 + (i - 1.0) * BEAM_SPACING, BEAM_ORIGIN_Y);
    let angle = BEAM_BASE_ANGLE + (t * BEAM_SWAY_FREQUENCY + i).sin() * BEAM_SWAY_AMPLITUDE;
    let width = BEAM_BASE_WIDTH + (t + i).sin() * BEAM_WIDTH_AMPLITUDE;
    (origin, angle, width)
}

/// Stops of a mist blob's radial gradient.
pub fn mist_stops(mist: &MistBlob) -> Stops {
    smallvec![
        ColorStop::new(0.0, mist.color.with_alpha(mist.alpha())),
        ColorStop::new(MIST_MID_STOP, mist.color.with_alpha(MIST_MID_ALPHA)),
        ColorStop::new(1.0, Rgba::TRANSPARENT),
    ]
}

fn clear<S: Surface + ?Sized>(surface: &mut S, width: f32, height: f32) {
    surface.reset_transform();
    surface.set_composite(CompositeMode::SourceOver);
    surface.fill_rect(0.0, 0.0, width, height, &Paint::Solid(BACKGROUND.with_alpha(1.0)));
}

fn draw_mist<S: Surface + ?Sized>(surface: &mut S, mist: &MistBlob) {
    surface.save();
    surface.translate(mist.x, mist.y);
    surface.rotate(mist.angle * MIST_ROTATION_FACTOR);
    surface.scale(mist.stretch, 1.0);
    let paint = Paint::Radial {
        radius: mist.radius,
        stops: mist_stops(mist),
    };
    surface.fill_circle(0.0, 0.0, mist.radius, &paint);
    surface.restore();
}

fn draw_beam<S: Surface + ?Sized>(surface: &mut S, index: usize, t: f32, width: f32, height: f32) {
    let (origin, angle, beam_width) = beam_geometry(index, t, width);
    let length = height * BEAM_LENGTH_FACTOR;
    surface.save();
    surface.translate(origin.x, origin.y);
    surface.rotate(angle);
    let paint = Paint::Linear {
        from: Vec2::ZERO,
        to: Vec2::new(0.0, length),
        stops: smallvec![
            ColorStop::new(0.0, BEAM_TOP.0.with_alpha(BEAM_TOP.1)),
            ColorStop::new(0.5, BEAM_MID.0.with_alpha(BEAM_MID.1)),
            ColorStop::new(1.0, Rgba::TRANSPARENT),
        ],
    };
    surface.fill_rect(-beam_width / 2.0, 0.0, beam_width, length, &paint);
    surface.restore();
}

fn draw_star<S: Surface + ?Sized>(surface: &mut S, star: &Star, t: f32) {
    let alpha = star_alpha(star, t);
    surface.fill_circle(
        star.x,
        star.y,
        star.size,
        &Paint::Solid(STAR_COLOR.with_alpha(alpha)),
    );
    if star.is_bright() {
        surface.fill_circle(
            star.x,
            star.y,
            star.size * HALO_RADIUS_FACTOR,
            &Paint::Solid(HALO_COLOR.with_alpha(alpha * HALO_ALPHA_FACTOR)),
        );
    }
}
