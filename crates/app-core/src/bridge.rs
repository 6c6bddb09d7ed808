//! Velocity hand-off from the scroll engine to the GPU distortion layer.
//!
//! The upstream value changes in discrete steps faster than the GPU frame
//! cadence; consuming it raw produces visible judder in the shader. The
//! bridge smooths each change over a short ease-out instead, and this is
//! the only coupling between the two subsystems.

use crate::constants::{VELOCITY_SMOOTH_SEC, VELOCITY_SMOOTH_THRESHOLD};
use crate::tween::{Ease, Tween};

#[derive(Clone, Debug, Default)]
pub struct VelocityBridge {
    smoothed: f32,
    tween: Option<Tween>,
}

impl VelocityBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> f32 {
        self.smoothed
    }

    /// Sample the shared velocity once per render frame. Moves beyond the
    /// jitter threshold retarget the smoothing transition; anything smaller
    /// keeps the one in flight.
    pub fn sample(&mut self, target_velocity: f32, dt_sec: f32) -> f32 {
        let heading_to = self.tween.as_ref().map_or(self.smoothed, Tween::to);
        if (target_velocity - heading_to).abs() > VELOCITY_SMOOTH_THRESHOLD {
            match &mut self.tween {
                Some(tween) => tween.retarget(target_velocity, VELOCITY_SMOOTH_SEC),
                None => {
                    self.tween = Some(Tween::new(
                        self.smoothed,
                        target_velocity,
                        VELOCITY_SMOOTH_SEC,
                        Ease::Power2Out,
                    ));
                }
            }
        }

        if let Some(tween) = &mut self.tween {
            self.smoothed = tween.step(dt_sec);
            if tween.is_done() {
                self.tween = None;
            }
        }
        self.smoothed
    }
}
