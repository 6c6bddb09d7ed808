//! Damped scroll integration for one column.
//!
//! `step()` runs once per display refresh. It eases `current` toward
//! `target`, clamps per-frame displacement, and keeps the position inside
//! the duplicated-content buffer by wrapping a full content height at the
//! seams. The caller turns the returned outcome into DOM writes; nothing
//! here touches a presentation layer.

use smallvec::SmallVec;
use thiserror::Error;

use crate::constants::{
    SCROLL_LERP, SCROLL_MAX_SPEED, SETTLE_EPSILON_PX, VELOCITY_FEEDBACK, WRAP_SEED_FACTOR,
    WRAP_VELOCITY_FALLOFF,
};

#[derive(Debug, Error)]
pub enum PhysicsError {
    #[error("content height must be positive, got {0}")]
    NonPositiveContentHeight(f32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Down,
    Up,
}

/// Which seam a wrap correction crossed this step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WrapEdge {
    Upper,
    Lower,
}

/// Result of one integration step.
#[derive(Clone, Debug, Default)]
pub struct StepOutcome {
    /// The column moved this frame.
    pub moving: bool,
    /// True exactly once, on the moving -> idle transition.
    pub settled: bool,
    /// Wrap corrections applied this step.
    pub wraps: SmallVec<[WrapEdge; 2]>,
    /// Translation to apply along the scroll axis, in pixels.
    pub translate_y: f32,
}

/// Position/target/velocity triple for one column.
#[derive(Clone, Debug)]
pub struct ScrollPhysics {
    pub current: f32,
    pub target: f32,
    pub last: f32,
    /// Normalized display velocity, `[0, 1]` after every step.
    pub velocity: f32,
    lerp: f32,
    max_speed: f32,
    content_height: f32,
    direction: Option<ScrollDirection>,
    was_moving: bool,
}

impl ScrollPhysics {
    /// Seeds the position at `WRAP_SEED_FACTOR * content_height` so both
    /// scroll directions have headroom before a seam.
    pub fn new(content_height: f32) -> Result<Self, PhysicsError> {
        debug_assert!(content_height > 0.0, "content height {content_height}");
        if content_height <= 0.0 {
            return Err(PhysicsError::NonPositiveContentHeight(content_height));
        }
        let seed = content_height * WRAP_SEED_FACTOR;
        Ok(Self {
            current: seed,
            target: seed,
            last: seed,
            velocity: 0.0,
            lerp: SCROLL_LERP,
            max_speed: SCROLL_MAX_SPEED,
            content_height,
            direction: None,
            was_moving: false,
        })
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn direction(&self) -> Option<ScrollDirection> {
        self.direction
    }

    /// Re-measure after a content rebuild. Position and target reseed.
    pub fn reset_content(&mut self, content_height: f32) -> Result<(), PhysicsError> {
        debug_assert!(content_height > 0.0, "content height {content_height}");
        if content_height <= 0.0 {
            return Err(PhysicsError::NonPositiveContentHeight(content_height));
        }
        self.content_height = content_height;
        let seed = content_height * WRAP_SEED_FACTOR;
        self.current = seed;
        self.target = seed;
        self.last = seed;
        self.velocity = 0.0;
        self.direction = None;
        self.was_moving = false;
        Ok(())
    }

    /// Zero out position and target (mobile/static representation).
    pub fn zero(&mut self) {
        self.current = 0.0;
        self.target = 0.0;
        self.last = 0.0;
        self.velocity = 0.0;
        self.direction = None;
        self.was_moving = false;
    }

    /// One integration step per display refresh.
    pub fn step(&mut self) -> StepOutcome {
        let mut out = StepOutcome::default();

        let delta = self.target - self.current;
        let smooth = delta * self.lerp;
        let clamped = smooth.abs().min(self.max_speed).copysign(smooth);

        if delta.abs() > SETTLE_EPSILON_PX {
            self.velocity = clamped.abs().min(1.0);
            self.current += clamped * (1.0 + self.velocity * VELOCITY_FEEDBACK);
            self.direction = Some(if delta > 0.0 {
                ScrollDirection::Down
            } else {
                ScrollDirection::Up
            });
            out.moving = true;
            self.was_moving = true;
        } else {
            self.velocity = 0.0;
            out.settled = self.was_moving;
            self.was_moving = false;
        }

        // Wrap correction, every step, unconditionally. Softens the seam by
        // halving velocity so dependent effects see no speed discontinuity.
        let h = self.content_height;
        if self.current >= h * WRAP_SEED_FACTOR {
            self.current -= h;
            self.target -= h;
            self.velocity *= WRAP_VELOCITY_FALLOFF;
            out.wraps.push(WrapEdge::Upper);
        } else if self.current <= 0.0 {
            self.current += h;
            self.target += h;
            self.velocity *= WRAP_VELOCITY_FALLOFF;
            out.wraps.push(WrapEdge::Lower);
        }

        self.last = self.current;
        out.translate_y = -self.current;
        out
    }
}
