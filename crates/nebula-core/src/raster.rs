//! CPU implementation of [`Surface`].
//!
//! Pixels are premultiplied linear-in-value `f32` RGBA. Coverage is sampled once
//! at each pixel centre (no anti-aliasing), which keeps output exactly
//! reproducible for a given sequence of draw calls.

use crate::color::sample_stops;
use crate::surface::{CompositeMode, Paint, Surface};
use glam::{Affine2, Vec2};

#[derive(Clone, Copy, Debug)]
struct DrawState {
    transform: Affine2,
    mode: CompositeMode,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine2::IDENTITY,
            mode: CompositeMode::SourceOver,
        }
    }
}

pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 4]>,
    state: DrawState,
    stack: Vec<DrawState>,
}

impl Raster {
    /// Transparent raster of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0; 4]; width as usize * height as usize],
            state: DrawState::default(),
            stack: Vec::new(),
        }
    }

    /// Premultiplied value at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// 8-bit straight-alpha RGBA at `(x, y)`.
    pub fn pixel_rgba8(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixel(x, y).map(to_rgba8)
    }

    /// Copy the buffer out as tightly packed 8-bit RGBA rows.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.pixels.len() * 4];
        self.write_rgba8(&mut out);
        out
    }

    /// Write tightly packed 8-bit RGBA into `out`, which must hold `width * height * 4` bytes.
    pub fn write_rgba8(&self, out: &mut [u8]) {
        let needed = self.pixels.len() * 4;
        if out.len() < needed {
            log::warn!("[raster] output buffer too small: {} < {}", out.len(), needed);
            return;
        }
        let texels: &mut [[u8; 4]] = bytemuck::cast_slice_mut(&mut out[..needed]);
        for (dst, src) in texels.iter_mut().zip(&self.pixels) {
            *dst = to_rgba8(*src);
        }
    }

    fn fill_shape(
        &mut self,
        local_min: Vec2,
        local_max: Vec2,
        inside: impl Fn(Vec2) -> bool,
        paint: &Paint,
    ) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let m = self.state.transform;
        let det = m.matrix2.determinant();
        if !det.is_finite() || det.abs() < 1e-12 {
            return;
        }
        let inv = m.inverse();

        let corners = [
            m.transform_point2(local_min),
            m.transform_point2(Vec2::new(local_max.x, local_min.y)),
            m.transform_point2(local_max),
            m.transform_point2(Vec2::new(local_min.x, local_max.y)),
        ];
        let mut lo = corners[0];
        let mut hi = corners[0];
        for c in &corners[1..] {
            lo = lo.min(*c);
            hi = hi.max(*c);
        }
        if !lo.is_finite() || !hi.is_finite() {
            return;
        }
        let x0 = lo.x.floor().max(0.0) as u32;
        let y0 = lo.y.floor().max(0.0) as u32;
        let x1 = (hi.x.ceil().max(0.0) as u32).min(self.width);
        let y1 = (hi.y.ceil().max(0.0) as u32).min(self.height);

        let mode = self.state.mode;
        for py in y0..y1 {
            let row = (py * self.width) as usize;
            for px in x0..x1 {
                let local = inv.transform_point2(Vec2::new(px as f32 + 0.5, py as f32 + 0.5));
                if !inside(local) {
                    continue;
                }
                let src = shade(paint, local);
                if src == [0.0; 4] {
                    continue;
                }
                blend(mode, &mut self.pixels[row + px as usize], src);
            }
        }
    }
}

impl Surface for Raster {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![[0.0; 4]; width as usize * height as usize];
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        self.state.mode = mode;
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn reset_transform(&mut self) {
        self.state.transform = Affine2::IDENTITY;
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.state.transform = self.state.transform * Affine2::from_translation(Vec2::new(x, y));
    }

    fn rotate(&mut self, radians: f32) {
        self.state.transform = self.state.transform * Affine2::from_angle(radians);
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.state.transform = self.state.transform * Affine2::from_scale(Vec2::new(sx, sy));
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, paint: &Paint) {
        let a = Vec2::new(x, y);
        let b = Vec2::new(x + width, y + height);
        let (min, max) = (a.min(b), a.max(b));
        self.fill_shape(
            min,
            max,
            |p| p.x >= min.x && p.x < max.x && p.y >= min.y && p.y < max.y,
            paint,
        );
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint) {
        if radius.is_nan() || radius <= 0.0 {
            return;
        }
        let center = Vec2::new(cx, cy);
        let r2 = radius * radius;
        self.fill_shape(
            center - Vec2::splat(radius),
            center + Vec2::splat(radius),
            |p| p.distance_squared(center) <= r2,
            paint,
        );
    }
}

/// Premultiplied source colour of `paint` at a point in local space.
fn shade(paint: &Paint, local: Vec2) -> [f32; 4] {
    match paint {
        Paint::Solid(c) => c.premultiplied(),
        Paint::Radial { radius, stops } => {
            let t = if *radius > 0.0 {
                local.length() / radius
            } else {
                1.0
            };
            sample_stops(stops, t)
        }
        Paint::Linear { from, to, stops } => {
            let dir = *to - *from;
            let len2 = dir.length_squared();
            let t = if len2 > 0.0 {
                (local - *from).dot(dir) / len2
            } else {
                0.0
            };
            sample_stops(stops, t)
        }
    }
}

/// Composite premultiplied `src` onto premultiplied `dst`.
#[inline]
pub fn blend(mode: CompositeMode, dst: &mut [f32; 4], src: [f32; 4]) {
    match mode {
        CompositeMode::SourceOver => {
            let k = 1.0 - src[3];
            for c in 0..4 {
                dst[c] = src[c] + dst[c] * k;
            }
        }
        CompositeMode::Lighter => {
            for c in 0..4 {
                dst[c] = (src[c] + dst[c]).min(1.0);
            }
        }
        // Separable screen blend folded into source-over; in premultiplied
        // form it reduces to S + D - S*D for colour and alpha alike.
        CompositeMode::Screen => {
            for c in 0..4 {
                dst[c] = src[c] + dst[c] - src[c] * dst[c];
            }
        }
    }
}

#[inline]
fn to_rgba8(p: [f32; 4]) -> [u8; 4] {
    let a = p[3].clamp(0.0, 1.0);
    if a <= 0.0 {
        return [0, 0, 0, 0];
    }
    let q = |v: f32| ((v / a).clamp(0.0, 1.0) * 255.0).round() as u8;
    [q(p[0]), q(p[1]), q(p[2]), (a * 255.0).round() as u8]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn screen_never_darkens() {
        let mut dst = [0.4, 0.2, 0.1, 1.0];
        blend(CompositeMode::Screen, &mut dst, [0.3, 0.3, 0.3, 0.3]);
        assert!(dst[0] >= 0.4 && dst[1] >= 0.2 && dst[2] >= 0.1);
        assert!((dst[0] - (0.3 + 0.4 - 0.12)).abs() < 1e-6);
        assert!((dst[3] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn lighter_adds_and_clamps() {
        let mut dst = [0.8, 0.1, 0.0, 1.0];
        blend(CompositeMode::Lighter, &mut dst, [0.5, 0.2, 0.0, 0.5]);
        assert_eq!(dst[0], 1.0);
        assert!((dst[1] - 0.3).abs() < 1e-6);
        assert_eq!(dst[3], 1.0);
    }

    #[test]
    fn source_over_replaces_with_opaque_source() {
        let mut dst = [0.8, 0.1, 0.0, 1.0];
        blend(CompositeMode::SourceOver, &mut dst, [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(dst, [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn circle_covers_centre_not_corner() {
        let mut r = Raster::new(10, 10);
        r.fill_circle(5.0, 5.0, 3.0, &Paint::Solid(Rgb::new(255, 255, 255).with_alpha(1.0)));
        assert_eq!(r.pixel_rgba8(5, 5), Some([255, 255, 255, 255]));
        assert_eq!(r.pixel_rgba8(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn save_restore_round_trips_transform_and_mode() {
        let mut r = Raster::new(4, 4);
        r.save();
        r.translate(100.0, 0.0);
        r.set_composite(CompositeMode::Lighter);
        r.restore();
        assert_eq!(r.state.mode, CompositeMode::SourceOver);
        r.fill_rect(0.0, 0.0, 1.0, 1.0, &Paint::Solid(Rgb::new(255, 0, 0).with_alpha(1.0)));
        assert_eq!(r.pixel_rgba8(0, 0), Some([255, 0, 0, 255]));
    }

    #[test]
    fn scaled_transform_stretches_circle_horizontally() {
        let mut r = Raster::new(40, 20);
        r.translate(20.0, 10.0);
        r.scale(2.0, 1.0);
        r.fill_circle(0.0, 0.0, 5.0, &Paint::Solid(Rgb::new(255, 255, 255).with_alpha(1.0)));
        // 8 px right of centre is inside a 10 px semi-axis, outside a 5 px one
        assert_eq!(r.pixel_rgba8(28, 10).map(|p| p[3]), Some(255));
        assert_eq!(r.pixel_rgba8(20, 17).map(|p| p[3]), Some(0));
    }

    #[test]
    fn rgba8_output_length_matches_buffer() {
        let r = Raster::new(3, 2);
        assert_eq!(r.to_rgba8().len(), 3 * 2 * 4);
    }
}
