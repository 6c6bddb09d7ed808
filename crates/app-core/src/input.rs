//! Input-to-target mapping for one column.
//!
//! Three sources feed the same `target` field: wheel (eased over a short
//! tween, last burst wins), touch (immediate, cumulative), and an idle
//! drift that keeps the columns ambling while nothing else is in flight.
//! The damping step downstream treats all of them uniformly.

use crate::constants::{
    IDLE_DRIFT_PX_PER_SEC, SHARED_VELOCITY_SCALE, WHEEL_MAX_DELTA, WHEEL_MULTIPLIER,
    WHEEL_SETTLE_SEC, WHEEL_TWEEN_SEC,
};
use crate::physics::ScrollPhysics;
use crate::tween::{Ease, Tween};

/// Wheel delta -> target delta. The raw delta is clamped, scaled, and
/// flipped for reversed columns (which scroll visually opposite to their
/// sibling for the same gesture).
#[inline]
pub fn wheel_target_delta(raw_delta: f32, reverse: bool) -> f32 {
    let direction = if reverse { 1.0 } else { -1.0 };
    raw_delta.abs().min(WHEEL_MAX_DELTA).copysign(raw_delta) * WHEEL_MULTIPLIER * direction
}

/// Touch-move delta from two consecutive client-Y samples.
#[inline]
pub fn touch_target_delta(previous_y: f32, current_y: f32, reverse: bool) -> f32 {
    let direction = if reverse { -1.0 } else { 1.0 };
    (previous_y - current_y) * direction
}

/// Velocity published to the shared state while input is live: proportional
/// to the remaining delta, bounded to `[-1, 1]`.
#[inline]
pub fn shared_velocity(target: f32, current: f32) -> f32 {
    ((target - current) * SHARED_VELOCITY_SCALE).clamp(-1.0, 1.0)
}

/// Source record index for a cloned DOM node: clones repeat the original
/// list, so the mapping is a plain modulo. `None` for an empty record list.
#[inline]
pub fn project_for_clone(clone_index: usize, record_count: usize) -> Option<usize> {
    (record_count > 0).then(|| clone_index % record_count)
}

/// Per-frame input bookkeeping for one column.
#[derive(Clone, Debug)]
pub struct InputMapper {
    reverse: bool,
    paused: bool,
    auto_scroll: bool,
    user_scrolling: bool,
    wheel_tween: Option<Tween>,
    settle_remaining_sec: Option<f32>,
    touch_last_y: Option<f32>,
}

impl InputMapper {
    pub fn new(reverse: bool) -> Self {
        Self {
            reverse,
            paused: false,
            auto_scroll: true,
            user_scrolling: false,
            wheel_tween: None,
            settle_remaining_sec: None,
            touch_last_y: None,
        }
    }

    pub fn reverse(&self) -> bool {
        self.reverse
    }

    /// True while wheel or touch input is driving the target.
    pub fn user_scrolling(&self) -> bool {
        self.user_scrolling
    }

    /// Read by the idle drift driver.
    pub fn auto_scroll(&self) -> bool {
        self.auto_scroll && !self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
        self.auto_scroll = false;
    }

    pub fn resume(&mut self) {
        self.paused = false;
        if !self.user_scrolling {
            self.auto_scroll = true;
        }
    }

    /// A wheel burst eases the target over a short transition; a burst that
    /// lands mid-transition overwrites it from the value reached so far.
    pub fn on_wheel(&mut self, raw_delta: f32, physics: &ScrollPhysics) {
        let delta = wheel_target_delta(raw_delta, self.reverse);
        self.user_scrolling = true;
        self.auto_scroll = false;
        self.settle_remaining_sec = Some(WHEEL_SETTLE_SEC);
        match &mut self.wheel_tween {
            Some(tween) => {
                let to = tween.value() + delta;
                tween.retarget(to, WHEEL_TWEEN_SEC);
            }
            None => {
                self.wheel_tween = Some(Tween::new(
                    physics.target,
                    physics.target + delta,
                    WHEEL_TWEEN_SEC,
                    Ease::Power1Out,
                ));
            }
        }
    }

    pub fn on_touch_start(&mut self, client_y: f32) {
        self.touch_last_y = Some(client_y);
        self.paused = true;
        self.auto_scroll = false;
    }

    /// Touch feels direct: the delta goes straight into the target with no
    /// easing, accumulating across move samples.
    pub fn on_touch_move(&mut self, client_y: f32, physics: &mut ScrollPhysics) {
        let Some(previous) = self.touch_last_y else {
            self.touch_last_y = Some(client_y);
            return;
        };
        physics.target += touch_target_delta(previous, client_y, self.reverse);
        self.touch_last_y = Some(client_y);
        self.user_scrolling = true;
    }

    pub fn on_touch_end(&mut self) {
        self.touch_last_y = None;
        self.paused = false;
        self.user_scrolling = false;
        self.auto_scroll = true;
    }

    /// Advance the wheel tween, the settle timer, and the idle drift.
    /// Returns true when the settle timer expired this tick (the caller
    /// zeroes the shared velocity on that edge).
    pub fn tick(&mut self, dt_sec: f32, physics: &mut ScrollPhysics) -> bool {
        if let Some(tween) = &mut self.wheel_tween {
            physics.target = tween.step(dt_sec);
            if tween.is_done() {
                self.wheel_tween = None;
            }
        }

        let mut input_settled = false;
        if let Some(remaining) = &mut self.settle_remaining_sec {
            *remaining -= dt_sec;
            if *remaining <= 0.0 {
                self.settle_remaining_sec = None;
                self.user_scrolling = false;
                if !self.paused {
                    self.auto_scroll = true;
                }
                input_settled = true;
            }
        }

        if self.auto_scroll() && !self.user_scrolling {
            let direction = if self.reverse { -1.0 } else { 1.0 };
            physics.target += IDLE_DRIFT_PX_PER_SEC * dt_sec * direction;
        }

        input_settled
    }
}
