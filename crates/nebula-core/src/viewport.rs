use crate::config::ResizePolicy;
use crate::surface::Surface;

/// Drawing-surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn width_f32(&self) -> f32 {
        self.width as f32
    }

    #[inline]
    pub fn height_f32(&self) -> f32 {
        self.height as f32
    }
}

/// Result of feeding a resize notification to the [`ViewportManager`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// Zero-sized or same-size notification; nothing changed.
    Ignored,
    /// Surface resized, particle positions kept.
    Retained,
    /// Surface resized and the caller should re-seed the field.
    Reseed,
}

/// Tracks the current surface size and keeps the surface's pixel buffer in step.
#[derive(Clone, Debug)]
pub struct ViewportManager {
    viewport: Viewport,
    policy: ResizePolicy,
}

impl ViewportManager {
    pub fn new(viewport: Viewport, policy: ResizePolicy) -> Self {
        Self { viewport, policy }
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize<S: Surface + ?Sized>(
        &mut self,
        width: u32,
        height: u32,
        surface: &mut S,
    ) -> ResizeOutcome {
        if width == 0 || height == 0 {
            return ResizeOutcome::Ignored;
        }
        let next = Viewport::new(width, height);
        if next == self.viewport && surface.size() == (width, height) {
            return ResizeOutcome::Ignored;
        }
        log::debug!(
            "[viewport] {}x{} -> {}x{}",
            self.viewport.width,
            self.viewport.height,
            width,
            height
        );
        self.viewport = next;
        surface.resize(width, height);
        match self.policy {
            ResizePolicy::Retain => ResizeOutcome::Retained,
            ResizePolicy::Reseed => ResizeOutcome::Reseed,
        }
    }
}
