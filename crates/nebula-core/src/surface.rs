//! The drawing-surface seam shared by the Canvas 2D front-end and the CPU raster.
//!
//! The API mirrors the subset of the Canvas 2D context the renderer needs:
//! a transform stack, a global compositing mode and two filled shapes.
//! Gradient geometry is interpreted in the local space of the current transform.

use crate::color::{ColorStop, Rgba};
use glam::Vec2;
use smallvec::SmallVec;

/// Pixel compositing mode applied to every subsequent fill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompositeMode {
    /// Standard alpha replacement.
    #[default]
    SourceOver,
    /// Lightens by inverse-multiplying source and destination.
    Screen,
    /// Adds channel intensities, clamped.
    Lighter,
}

impl CompositeMode {
    /// Canvas 2D `globalCompositeOperation` name.
    pub fn as_css(self) -> &'static str {
        match self {
            CompositeMode::SourceOver => "source-over",
            CompositeMode::Screen => "screen",
            CompositeMode::Lighter => "lighter",
        }
    }
}

/// Gradient stops; three covers every gradient the renderer builds without spilling.
pub type Stops = SmallVec<[ColorStop; 3]>;

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    /// Centered on the local origin, running from radius 0 to `radius`.
    Radial { radius: f32, stops: Stops },
    /// Along the segment `from -> to`.
    Linear { from: Vec2, to: Vec2, stops: Stops },
}

pub trait Surface {
    /// Pixel-buffer dimensions.
    fn size(&self) -> (u32, u32);
    /// Resize the pixel buffer; contents are undefined afterwards.
    fn resize(&mut self, width: u32, height: u32);

    fn set_composite(&mut self, mode: CompositeMode);

    fn save(&mut self);
    fn restore(&mut self);
    fn reset_transform(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, radians: f32);
    fn scale(&mut self, sx: f32, sy: f32);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, paint: &Paint);
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint);
}
