//! Structured colors and gradient stops.
//!
//! Colors stay as numbers all the way to the drawing surface; the Canvas 2D
//! front-end formats CSS text only at the very edge.

use serde::{Deserialize, Serialize};

/// 8-bit sRGB triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn with_alpha(self, alpha: f32) -> Rgba {
        Rgba::new(self, alpha)
    }
}

/// An [`Rgb`] plus straight (non-premultiplied) alpha in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba {
        rgb: Rgb::new(0, 0, 0),
        alpha: 0.0,
    };

    pub fn new(rgb: Rgb, alpha: f32) -> Self {
        let alpha = if alpha.is_finite() {
            alpha.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { rgb, alpha }
    }

    /// Premultiplied, normalized `[r, g, b, a]`.
    #[inline]
    pub fn premultiplied(self) -> [f32; 4] {
        let a = self.alpha;
        [
            self.rgb.r as f32 / 255.0 * a,
            self.rgb.g as f32 / 255.0 * a,
            self.rgb.b as f32 / 255.0 * a,
            a,
        ]
    }
}

/// One stop of a gradient; `offset` runs from 0 at the gradient start to 1 at its end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

impl ColorStop {
    pub fn new(offset: f32, color: Rgba) -> Self {
        Self {
            offset: offset.clamp(0.0, 1.0),
            color,
        }
    }
}

/// Sample a stop list at `t` the way Canvas 2D does: stops are sorted by
/// offset, values before the first / after the last stop are held, and
/// neighbouring stops are interpolated in premultiplied space.
pub fn sample_stops(stops: &[ColorStop], t: f32) -> [f32; 4] {
    let Some(first) = stops.first() else {
        return [0.0; 4];
    };
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    if t <= first.offset {
        return first.color.premultiplied();
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            if span <= f32::EPSILON {
                return b.color.premultiplied();
            }
            let k = (t - a.offset) / span;
            let pa = a.color.premultiplied();
            let pb = b.color.premultiplied();
            return [
                pa[0] + (pb[0] - pa[0]) * k,
                pa[1] + (pb[1] - pa[1]) * k,
                pa[2] + (pb[2] - pa[2]) * k,
                pa[3] + (pb[3] - pa[3]) * k,
            ];
        }
    }
    stops[stops.len() - 1].color.premultiplied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_is_clamped_and_nan_safe() {
        assert_eq!(Rgb::new(1, 2, 3).with_alpha(1.7).alpha, 1.0);
        assert_eq!(Rgb::new(1, 2, 3).with_alpha(-0.2).alpha, 0.0);
        assert_eq!(Rgb::new(1, 2, 3).with_alpha(f32::NAN).alpha, 0.0);
    }

    #[test]
    fn stops_interpolate_premultiplied() {
        let stops = [
            ColorStop::new(0.0, Rgb::new(255, 255, 255).with_alpha(1.0)),
            ColorStop::new(1.0, Rgba::TRANSPARENT),
        ];
        let mid = sample_stops(&stops, 0.5);
        assert!((mid[0] - 0.5).abs() < 1e-6);
        assert!((mid[3] - 0.5).abs() < 1e-6);
        assert_eq!(sample_stops(&stops, 2.0), [0.0; 4]);
        assert_eq!(sample_stops(&stops, -1.0), [1.0; 4]);
    }

    #[test]
    fn empty_stop_list_is_transparent() {
        assert_eq!(sample_stops(&[], 0.3), [0.0; 4]);
    }
}
