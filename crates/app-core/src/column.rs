//! Per-frame orchestration for one column.
//!
//! Owns the position triple, the input mapper, and the line field, and
//! fixes the in-frame ordering: input -> physics -> content transform ->
//! line writes -> shared-state publish. The presentation layer behind the
//! `RenderTarget` trait is the only side-effect channel.

use smallvec::SmallVec;

use crate::constants::LINE_RESET_SEC;
use crate::input::{shared_velocity, InputMapper};
use crate::lines::LineField;
use crate::physics::{PhysicsError, ScrollPhysics, WrapEdge};
use crate::state::ScrollState;
use crate::surface::RenderTarget;

/// Explicit state for the one-shot settle reset: a second trigger while a
/// pass is in flight is ignored, never stacked.
#[derive(Clone, Copy, Debug, PartialEq)]
enum ResetPass {
    Idle,
    InFlight { remaining_sec: f32 },
}

/// What one engine frame did, for callers and tests.
#[derive(Clone, Debug, Default)]
pub struct FrameReport {
    pub stepped: bool,
    pub moving: bool,
    pub settled: bool,
    pub wraps: SmallVec<[WrapEdge; 2]>,
}

pub struct ColumnEngine {
    pub physics: ScrollPhysics,
    pub input: InputMapper,
    pub lines: LineField,
    controls_shared: bool,
    destroyed: bool,
    last_translate: Option<i64>,
    reset: ResetPass,
    line_scratch: Vec<(usize, crate::lines::LineWrite)>,
}

impl ColumnEngine {
    pub fn new(
        content_height: f32,
        viewport_height: f32,
        reverse: bool,
        controls_shared: bool,
    ) -> Result<Self, PhysicsError> {
        Ok(Self {
            physics: ScrollPhysics::new(content_height)?,
            input: InputMapper::new(reverse),
            lines: LineField::new(reverse, viewport_height),
            controls_shared,
            destroyed: false,
            last_translate: None,
            reset: ResetPass::Idle,
            line_scratch: Vec::new(),
        })
    }

    /// Deterministic teardown. Subsequent frames are no-ops, which is also
    /// how the web loop decides to stop renewing its frame request.
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    // Input delegation; hosts talk to the engine, not to its parts.

    pub fn on_wheel(&mut self, raw_delta: f32) {
        self.input.on_wheel(raw_delta, &self.physics);
    }

    pub fn on_touch_start(&mut self, client_y: f32) {
        self.input.on_touch_start(client_y);
    }

    pub fn on_touch_move(&mut self, client_y: f32) {
        self.input.on_touch_move(client_y, &mut self.physics);
    }

    pub fn on_touch_end(&mut self) {
        self.input.on_touch_end();
    }

    pub fn pause(&mut self) {
        self.input.pause();
    }

    pub fn resume(&mut self) {
        self.input.resume();
    }

    /// Re-measure after a content rebuild; forgets the transform memo so
    /// the first frame after the rebuild always writes.
    pub fn reset_content(&mut self, content_height: f32) -> Result<(), PhysicsError> {
        self.physics.reset_content(content_height)?;
        self.last_translate = None;
        self.lines.clear();
        Ok(())
    }

    /// One engine frame. `dt_sec` is the wall-clock delta since the last
    /// frame; `shared` is published only by the controlling column.
    pub fn frame(
        &mut self,
        dt_sec: f32,
        target: &mut dyn RenderTarget,
        shared: &mut ScrollState,
    ) -> FrameReport {
        let mut report = FrameReport::default();
        if self.destroyed {
            return report;
        }
        report.stepped = true;

        let input_settled = self.input.tick(dt_sec, &mut self.physics);
        let out = self.physics.step();
        report.moving = out.moving;
        report.settled = out.settled;
        report.wraps = out.wraps;

        // Single transform write per frame, skipped when the value did not
        // move by at least a hundredth of a pixel.
        let quantized = (out.translate_y * 100.0).round() as i64;
        if self.last_translate != Some(quantized) {
            target.set_transform(out.translate_y);
            self.last_translate = Some(quantized);
        }

        if report.moving {
            self.line_scratch.clear();
            self.lines
                .update(self.physics.current, self.physics.velocity, &mut self.line_scratch);
            for (index, write) in self.line_scratch.drain(..) {
                target.write_line(index, write);
            }
        } else if report.settled && self.reset == ResetPass::Idle {
            target.reset_lines();
            self.lines.forget_applied();
            self.reset = ResetPass::InFlight {
                remaining_sec: LINE_RESET_SEC,
            };
        }

        if let ResetPass::InFlight { remaining_sec } = &mut self.reset {
            *remaining_sec -= dt_sec;
            if *remaining_sec <= 0.0 {
                self.reset = ResetPass::Idle;
            }
        }

        if self.controls_shared {
            shared.current = self.physics.current;
            shared.target = self.physics.target;
            shared.is_scrolling = report.moving;
            shared.velocity = if report.moving && !input_settled {
                shared_velocity(self.physics.target, self.physics.current)
            } else {
                0.0
            };
        }

        report
    }
}
