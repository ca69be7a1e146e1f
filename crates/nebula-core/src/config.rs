//! Runtime configuration for one mounted backdrop.
//!
//! Every field has a default matching the stock look, so an empty JSON object
//! (`{}`) is a valid config.

use crate::constants::*;
use crate::error::{NebulaError, Result};
use serde::{Deserialize, Serialize};

/// How wall-clock frame timing maps onto simulation step units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FramePacing {
    /// One step unit per displayed frame regardless of refresh rate.
    #[default]
    Fixed,
    /// Step units follow real elapsed time at [`NOMINAL_FPS`], capped at `max_units`.
    Elapsed { max_units: f32 },
}

/// What a viewport resize does to particle positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizePolicy {
    /// Keep positions; particles outside the new bounds stay there until they drift back.
    #[default]
    Retain,
    /// Re-seed the whole field for the new size.
    Reseed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NebulaConfig {
    pub star_count: usize,
    pub mist_layers: usize,
    pub beam_count: usize,
    pub time_step: f32,
    pub drift_step: f32,
    pub pacing: FramePacing,
    pub resize_policy: ResizePolicy,
    /// Fixed seed for reproducible fields; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for NebulaConfig {
    fn default() -> Self {
        Self {
            star_count: STAR_COUNT,
            mist_layers: MIST_LAYERS,
            beam_count: BEAM_COUNT,
            time_step: TIME_STEP,
            drift_step: DRIFT_STEP,
            pacing: FramePacing::Fixed,
            resize_policy: ResizePolicy::Retain,
            seed: None,
        }
    }
}

impl NebulaConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: NebulaConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.star_count == 0 {
            return Err(NebulaError::InvalidConfig("star_count must be > 0".into()));
        }
        if self.mist_layers == 0 {
            return Err(NebulaError::InvalidConfig("mist_layers must be > 0".into()));
        }
        check_step("time_step", self.time_step)?;
        check_step("drift_step", self.drift_step)?;
        if let FramePacing::Elapsed { max_units } = self.pacing {
            if !max_units.is_finite() || max_units <= 0.0 {
                return Err(NebulaError::InvalidConfig(format!(
                    "pacing.max_units must be finite and > 0, got {max_units}"
                )));
            }
        }
        Ok(())
    }
}

fn check_step(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(NebulaError::InvalidConfig(format!(
            "{name} must be finite and >= 0, got {value}"
        )))
    }
}
