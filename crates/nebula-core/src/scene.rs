//! One mounted backdrop: field, clock, viewport and renderer bundled together.

use crate::config::NebulaConfig;
use crate::error::Result;
use crate::field::ParticleField;
use crate::render::Renderer;
use crate::stepper::SimulationStepper;
use crate::surface::Surface;
use crate::viewport::{ResizeOutcome, Viewport, ViewportManager};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct NebulaScene<R = StdRng> {
    config: NebulaConfig,
    field: ParticleField,
    stepper: SimulationStepper,
    viewport: ViewportManager,
    renderer: Renderer,
    rng: R,
}

impl NebulaScene<StdRng> {
    /// Seeded from `config.seed`, or from OS entropy when unset.
    pub fn new(config: NebulaConfig, viewport: Viewport) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, viewport, rng)
    }
}

impl<R: Rng> NebulaScene<R> {
    pub fn with_rng(config: NebulaConfig, viewport: Viewport, mut rng: R) -> Result<Self> {
        config.validate()?;
        let field = ParticleField::new(
            viewport.width_f32(),
            viewport.height_f32(),
            &config,
            &mut rng,
        );
        Ok(Self {
            stepper: SimulationStepper::new(&config),
            viewport: ViewportManager::new(viewport, config.resize_policy),
            renderer: Renderer::new(config.beam_count),
            config,
            field,
            rng,
        })
    }

    #[inline]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    #[inline]
    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.stepper.time()
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport.viewport()
    }

    #[inline]
    pub fn config(&self) -> &NebulaConfig {
        &self.config
    }

    pub fn advance(&mut self, dt_units: f32) {
        let viewport = self.viewport.viewport();
        self.stepper.advance(&mut self.field, viewport, dt_units);
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.renderer.draw(surface, &self.field, self.stepper.time());
    }

    pub fn resize<S: Surface + ?Sized>(
        &mut self,
        width: u32,
        height: u32,
        surface: &mut S,
    ) -> ResizeOutcome {
        let outcome = self.viewport.resize(width, height, surface);
        if outcome == ResizeOutcome::Reseed {
            self.reseed();
        }
        outcome
    }

    /// Re-run field initialization for the current viewport; the clock keeps running.
    pub fn reseed(&mut self) {
        let vp = self.viewport.viewport();
        self.field
            .initialize(vp.width_f32(), vp.height_f32(), &self.config, &mut self.rng);
    }
}
