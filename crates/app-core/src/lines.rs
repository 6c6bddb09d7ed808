//! Lateral line distortion keyed to scroll position and velocity.
//!
//! Baseline offsets are captured once after the deferred text split lays
//! out; until then the field is empty and updates are no-ops ("lines not
//! yet available" is a valid transient state, not an error). Every write
//! is memoized per line so unchanged frames cost nothing downstream.

use std::f32::consts::PI;

use crate::constants::{LINE_BASE_AMPLITUDE, LINE_CULL_MARGIN_PX, LINE_VELOCITY_MULTIPLIER};

/// One split text fragment.
#[derive(Clone, Copy, Debug)]
pub struct Line {
    /// Vertical offset captured at prepare time; stale after resize.
    pub baseline_top: f32,
    /// Last applied lateral offset, `None` when neutral.
    pub last_offset: Option<f32>,
}

/// Write instruction for the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineWrite {
    Neutral,
    Lateral(f32),
}

/// Distortion amplitude for the current normalized velocity.
#[inline]
pub fn amplitude(velocity: f32) -> f32 {
    LINE_BASE_AMPLITUDE + LINE_VELOCITY_MULTIPLIER * velocity.min(1.0)
}

/// The set of lines for one column plus the state needed to place them.
#[derive(Clone, Debug)]
pub struct LineField {
    lines: Vec<Line>,
    viewport_height: f32,
    reverse: bool,
}

impl LineField {
    pub fn new(reverse: bool, viewport_height: f32) -> Self {
        Self {
            lines: Vec::new(),
            viewport_height,
            reverse,
        }
    }

    /// Install baseline offsets once layout has settled. Replaces any
    /// previous capture wholesale.
    pub fn install(&mut self, baseline_tops: impl IntoIterator<Item = f32>) {
        self.lines = baseline_tops
            .into_iter()
            .map(|top| Line {
                baseline_top: top,
                last_offset: None,
            })
            .collect();
    }

    /// Drop all captured lines (resize, rebuild, mobile mode).
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn set_viewport_height(&mut self, viewport_height: f32) {
        self.viewport_height = viewport_height;
    }

    pub fn is_ready(&self) -> bool {
        !self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Compute this frame's writes. Only changed lines are pushed into
    /// `out`. Lines outside the extended viewport window are reset to
    /// neutral and never receive a lateral offset.
    pub fn update(&mut self, scroll_current: f32, velocity: f32, out: &mut Vec<(usize, LineWrite)>) {
        if self.lines.is_empty() {
            return;
        }
        let amp = amplitude(velocity);
        let y = if self.reverse {
            scroll_current
        } else {
            -scroll_current
        };
        let vh = self.viewport_height;

        for (i, line) in self.lines.iter_mut().enumerate() {
            let pos_y = line.baseline_top + y;

            if pos_y < -LINE_CULL_MARGIN_PX || pos_y > vh + LINE_CULL_MARGIN_PX {
                if line.last_offset.is_some() {
                    line.last_offset = None;
                    out.push((i, LineWrite::Neutral));
                }
                continue;
            }

            let progress = (pos_y / vh).clamp(0.0, 1.0);
            // Opposite columns bow opposite ways: cos vs sin keyed to
            // position in viewport, not time.
            let x = if self.reverse {
                (progress * PI).cos() * amp
            } else {
                (progress * PI).sin() * amp
            };

            if line.last_offset != Some(x) {
                line.last_offset = Some(x);
                out.push((i, LineWrite::Lateral(x)));
            }
        }
    }

    /// Forget memoized offsets so the next update rewrites every visible
    /// line (used after the eased reset pass returned them to neutral).
    pub fn forget_applied(&mut self) {
        for line in &mut self.lines {
            line.last_offset = None;
        }
    }
}
