//! Eased value transitions used for wheel target motion and velocity
//! smoothing. A new transition on a live tween always overwrites it
//! (last input wins, nothing queues).

/// Easing curves matching the presets the effects were tuned against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Linear,
    /// Quadratic ease-out.
    Power1Out,
    /// Cubic ease-out.
    Power2Out,
    /// Quartic ease-out, used by the line reset pass.
    QuartOut,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::QuartOut => 1.0 - (1.0 - t).powi(4),
        }
    }
}

/// A time-driven transition of a single scalar.
#[derive(Clone, Copy, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    duration_sec: f32,
    elapsed_sec: f32,
    ease: Ease,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration_sec: f32, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration_sec: duration_sec.max(f32::EPSILON),
            elapsed_sec: 0.0,
            ease,
        }
    }

    /// Value at the current point of the transition.
    pub fn value(&self) -> f32 {
        let t = (self.elapsed_sec / self.duration_sec).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * self.ease.apply(t)
    }

    /// End value the tween is heading toward.
    pub fn to(&self) -> f32 {
        self.to
    }

    pub fn is_done(&self) -> bool {
        self.elapsed_sec >= self.duration_sec
    }

    /// Advance by `dt` seconds and return the new value.
    pub fn step(&mut self, dt_sec: f32) -> f32 {
        self.elapsed_sec = (self.elapsed_sec + dt_sec).min(self.duration_sec);
        self.value()
    }

    /// Restart toward `new_to` from the value reached so far. Overwrite
    /// semantics: the remaining portion of the old transition is discarded.
    pub fn retarget(&mut self, new_to: f32, duration_sec: f32) {
        *self = Self::new(self.value(), new_to, duration_sec, self.ease);
    }
}
