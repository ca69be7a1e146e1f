pub mod clock;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod field;
pub mod lifecycle;
pub mod raster;
pub mod render;
pub mod scene;
pub mod stepper;
pub mod surface;
pub mod viewport;

pub use clock::FrameClock;
pub use color::{ColorStop, Rgb, Rgba};
pub use config::{FramePacing, NebulaConfig, ResizePolicy};
pub use constants::*;
pub use error::{NebulaError, Result};
pub use field::{MistBlob, ParticleField, Star};
pub use lifecycle::{AnimationLoop, Lifecycle, Scheduler};
pub use raster::Raster;
pub use render::{star_alpha, Renderer};
pub use scene::NebulaScene;
pub use stepper::SimulationStepper;
pub use surface::{CompositeMode, Paint, Surface};
pub use viewport::{ResizeOutcome, Viewport, ViewportManager};
