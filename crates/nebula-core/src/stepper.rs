//! Per-frame advance of the global clock and mist drift.

use crate::config::NebulaConfig;
use crate::constants::{MIST_WRAP_MARGIN, TIME_PERIOD};
use std::f32::consts::TAU;
use crate::field::{MistBlob, ParticleField};
use crate::viewport::Viewport;

#[derive(Clone, Debug)]
pub struct SimulationStepper {
    time: f32,
    time_step: f32,
    drift_step: f32,
}

impl SimulationStepper {
    pub fn new(config: &NebulaConfig) -> Self {
        Self {
            time: 0.0,
            time_step: config.time_step,
            drift_step: config.drift_step,
        }
    }

    /// Global animation time `t`, kept in `[0, TIME_PERIOD)`.
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Advance by `dt_units` nominal frames. Non-finite or negative input is a no-op.
    pub fn advance(&mut self, field: &mut ParticleField, viewport: Viewport, dt_units: f32) {
        let dt = if dt_units.is_finite() {
            dt_units.max(0.0)
        } else {
            0.0
        };
        if dt == 0.0 {
            return;
        }
        self.time = (self.time + self.time_step * dt).rem_euclid(TIME_PERIOD);
        let width = viewport.width_f32();
        let height = viewport.height_f32();
        let step = self.drift_step * dt;
        for mist in &mut field.mists {
            drift(mist, step, dt);
            wrap(mist, width, height);
        }
    }
}

#[inline]
fn drift(mist: &mut MistBlob, step: f32, dt: f32) {
    // Heading and the half-angle rotation both look the same a full turn later.
    mist.angle = (mist.angle + mist.angular_speed * dt).rem_euclid(TAU);
    mist.x += mist.angle.cos() * step;
    mist.y += mist.angle.sin() * step;
}

// A blob that has fully left one side re-enters from the opposite side, so the
// cloud looks like it drifts forever instead of bouncing.
#[inline]
fn wrap(mist: &mut MistBlob, width: f32, height: f32) {
    let margin = mist.radius * MIST_WRAP_MARGIN;
    if mist.x < -margin {
        mist.x = width + margin;
    }
    if mist.x > width + margin {
        mist.x = -margin;
    }
    if mist.y < -margin {
        mist.y = height + margin;
    }
    if mist.y > height + margin {
        mist.y = -margin;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    fn blob(x: f32, y: f32, radius: f32) -> MistBlob {
        MistBlob {
            x,
            y,
            radius,
            angle: 0.0,
            angular_speed: 0.0,
            stretch: 1.0,
            color: Rgb::new(10, 30, 60),
            highlight: false,
        }
    }

    #[test]
    fn wrap_is_symmetric_on_each_edge() {
        let mut m = blob(0.0, 0.0, 10.0);
        m.x = 121.0;
        wrap(&mut m, 100.0, 50.0);
        assert_eq!(m.x, -20.0);

        m.y = -21.0;
        wrap(&mut m, 100.0, 50.0);
        assert_eq!(m.y, 70.0);

        m.y = 71.0;
        wrap(&mut m, 100.0, 50.0);
        assert_eq!(m.y, -20.0);
    }

    #[test]
    fn heading_stays_within_one_turn() {
        let mut m = blob(50.0, 25.0, 10.0);
        m.angle = 6.0;
        m.angular_speed = 0.001;
        drift(&mut m, 0.0, 1000.0);
        assert!((0.0..TAU).contains(&m.angle));
        assert!((m.angle - (7.0 - TAU)).abs() < 1e-4);

        m.angular_speed = -0.001;
        m.angle = 0.5;
        drift(&mut m, 0.0, 1000.0);
        assert!((m.angle - (TAU - 0.5)).abs() < 1e-4);
    }

    #[test]
    fn blob_exactly_on_threshold_stays_put() {
        let mut m = blob(-20.0, 70.0, 10.0);
        wrap(&mut m, 100.0, 50.0);
        assert_eq!((m.x, m.y), (-20.0, 70.0));
    }
}
