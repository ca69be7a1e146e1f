//! Command-line and environment settings for the desktop preview.

use anyhow::Context;
use nebula_core::NebulaConfig;
use std::path::Path;

pub const SEED_ENV: &str = "NEBULA_SEED";

/// Fraction of the window resolution the CPU raster runs at.
pub const RASTER_SCALE: f32 = 0.5;

/// Config from an optional JSON file, then the seed override applied.
pub fn load(path: Option<&Path>, seed_override: Option<&str>) -> anyhow::Result<NebulaConfig> {
    let config = match path {
        Some(p) => {
            let text = std::fs::read_to_string(p)
                .with_context(|| format!("reading {}", p.display()))?;
            NebulaConfig::from_json(&text).with_context(|| format!("parsing {}", p.display()))?
        }
        None => NebulaConfig::default(),
    };
    apply_seed(config, seed_override)
}

pub fn apply_seed(mut config: NebulaConfig, seed: Option<&str>) -> anyhow::Result<NebulaConfig> {
    if let Some(s) = seed {
        let seed = s
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{SEED_ENV} must be an unsigned integer, got {s:?}"))?;
        config.seed = Some(seed);
    }
    Ok(config)
}

/// Raster dimensions for a window of `width` x `height` physical pixels.
pub fn raster_size(width: u32, height: u32) -> (u32, u32) {
    let scale = |v: u32| ((v as f32 * RASTER_SCALE).round() as u32).max(1);
    (scale(width), scale(height))
}
