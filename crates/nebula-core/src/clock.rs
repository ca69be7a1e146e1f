use crate::config::FramePacing;
use crate::constants::NOMINAL_FPS;
use instant::Instant;

/// Turns frame callback timestamps into simulation step units.
#[derive(Clone, Debug)]
pub struct FrameClock {
    pacing: FramePacing,
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new(pacing: FramePacing) -> Self {
        Self { pacing, last: None }
    }

    /// Step units to advance for a frame observed at `now`. The first frame is always one unit.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let previous = self.last.replace(now);
        match self.pacing {
            FramePacing::Fixed => 1.0,
            FramePacing::Elapsed { max_units } => match previous {
                None => 1.0,
                Some(prev) => {
                    let secs = if now > prev {
                        (now - prev).as_secs_f32()
                    } else {
                        0.0
                    };
                    (secs * NOMINAL_FPS).clamp(0.0, max_units)
                }
            },
        }
    }

    /// Forget the last timestamp so the next frame counts as the first.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
