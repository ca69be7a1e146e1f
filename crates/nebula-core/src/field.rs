//! Star and mist-blob state for one mounted backdrop.
//!
//! The field is seeded once per mount from an injected random source and then
//! only the mist blobs move; stars are static and twinkle at draw time.

use crate::color::Rgb;
use crate::config::NebulaConfig;
use crate::constants::*;
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    /// Radius in px.
    pub size: f32,
    pub base_alpha: f32,
    /// Twinkle phase offset in `[0, 2π)`.
    pub phase: f32,
    pub twinkle_rate: f32,
}

impl Star {
    /// Stars above [`BRIGHT_STAR_MIN_SIZE`] get a bloom halo.
    #[inline]
    pub fn is_bright(&self) -> bool {
        self.size > BRIGHT_STAR_MIN_SIZE
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MistBlob {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Current drift heading in radians.
    pub angle: f32,
    /// Signed heading change per step unit.
    pub angular_speed: f32,
    /// Horizontal stretch in `[1, 2)`.
    pub stretch: f32,
    pub color: Rgb,
    pub highlight: bool,
}

impl MistBlob {
    /// Core alpha of the blob's gradient, picked by its highlight tier.
    #[inline]
    pub fn alpha(&self) -> f32 {
        if self.highlight {
            MIST_ALPHA_HIGHLIGHT
        } else {
            MIST_ALPHA_BASE
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleField {
    pub stars: Vec<Star>,
    pub mists: Vec<MistBlob>,
}

impl ParticleField {
    /// Build a freshly seeded field for a `width` x `height` viewport.
    pub fn new<R: Rng + ?Sized>(width: f32, height: f32, config: &NebulaConfig, rng: &mut R) -> Self {
        let mut field = Self::default();
        field.initialize(width, height, config, rng);
        field
    }

    /// Discard all prior positions and re-seed exactly `star_count` stars and
    /// `mist_layers` mist blobs.
    pub fn initialize<R: Rng + ?Sized>(
        &mut self,
        width: f32,
        height: f32,
        config: &NebulaConfig,
        rng: &mut R,
    ) {
        let width = width.max(0.0);
        let height = height.max(0.0);

        self.stars.clear();
        self.stars.reserve(config.star_count);
        for _ in 0..config.star_count {
            self.stars.push(seed_star(width, height, rng));
        }

        self.mists.clear();
        self.mists.reserve(config.mist_layers);
        for _ in 0..config.mist_layers {
            self.mists.push(seed_mist(width, height, rng));
        }
        log::debug!(
            "[field] seeded {} stars, {} mist blobs for {}x{}",
            self.stars.len(),
            self.mists.len(),
            width,
            height
        );
    }

    /// True when every numeric field of every particle is finite.
    pub fn is_finite(&self) -> bool {
        self.stars.iter().all(|s| {
            [s.x, s.y, s.size, s.base_alpha, s.phase, s.twinkle_rate]
                .iter()
                .all(|v| v.is_finite())
        }) && self.mists.iter().all(|m| {
            [m.x, m.y, m.radius, m.angle, m.angular_speed, m.stretch]
                .iter()
                .all(|v| v.is_finite())
        })
    }
}

// `gen::<f32>()` is in [0, 1), so `unit * extent` never reaches `extent`.
fn seed_star<R: Rng + ?Sized>(width: f32, height: f32, rng: &mut R) -> Star {
    let x = rng.gen::<f32>() * width;
    let y = rng.gen::<f32>() * height;
    let size_max = if rng.gen::<f32>() < 1.0 - BRIGHT_STAR_PROBABILITY {
        STAR_SIZE_SMALL_MAX
    } else {
        STAR_SIZE_BRIGHT_MAX
    };
    let size = rng.gen::<f32>() * size_max;
    let base_alpha = rng.gen::<f32>() * STAR_BASE_ALPHA_SPAN + STAR_BASE_ALPHA_MIN;
    let phase = rng.gen::<f32>() * TAU;
    let twinkle_rate = rng.gen::<f32>() * STAR_TWINKLE_RATE_MAX;
    Star {
        x: clamp_below(x, width),
        y: clamp_below(y, height),
        size,
        base_alpha,
        phase: clamp_below(phase, TAU),
        twinkle_rate,
    }
}

fn seed_mist<R: Rng + ?Sized>(width: f32, height: f32, rng: &mut R) -> MistBlob {
    let palette_index =
        ((rng.gen::<f32>() * MIST_PALETTE.len() as f32) as usize).min(MIST_PALETTE.len() - 1);
    let highlight = rng.gen::<f32>() > MIST_HIGHLIGHT_THRESHOLD;
    let x = rng.gen::<f32>() * width;
    let y = rng.gen::<f32>() * height;
    let radius = rng.gen::<f32>() * MIST_RADIUS_JITTER + width / MIST_RADIUS_WIDTH_DIVISOR;
    let angle = rng.gen::<f32>() * TAU;
    let angular_speed = (rng.gen::<f32>() - 0.5) * MIST_ANGULAR_SPEED_SPAN;
    let stretch = 1.0 + rng.gen::<f32>();
    MistBlob {
        x,
        y,
        radius,
        angle,
        angular_speed,
        stretch: stretch.min(2.0 - f32::EPSILON),
        color: MIST_PALETTE[palette_index],
        highlight,
    }
}

// f32 rounding can land `unit * extent` exactly on `extent` for large extents.
#[inline]
fn clamp_below(v: f32, extent: f32) -> f32 {
    if extent > 0.0 && v >= extent {
        f32::from_bits(extent.to_bits() - 1)
    } else {
        v
    }
}
