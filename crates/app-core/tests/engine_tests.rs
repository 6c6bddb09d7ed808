// End-to-end column engine tests against an in-memory render target: the
// full input -> physics -> write -> publish frame with no DOM behind it.

use app_core::{
    ColumnEngine, LineWrite, Rect, RenderTarget, ScrollState, WRAP_SEED_FACTOR,
};

const DT: f32 = 1.0 / 60.0;

#[derive(Default)]
struct MemoryTarget {
    transforms: Vec<f32>,
    line_writes: Vec<(usize, LineWrite)>,
    resets: usize,
    rect: Rect,
    children: usize,
}

impl RenderTarget for MemoryTarget {
    fn set_transform(&mut self, translate_y_px: f32) {
        self.transforms.push(translate_y_px);
    }
    fn write_line(&mut self, index: usize, write: LineWrite) {
        self.line_writes.push((index, write));
    }
    fn reset_lines(&mut self) {
        self.resets += 1;
    }
    fn bounding_rect(&self) -> Rect {
        self.rect
    }
    fn child_count(&self) -> usize {
        self.children
    }
}

fn engine(content_height: f32) -> ColumnEngine {
    let mut engine = ColumnEngine::new(content_height, 1000.0, false, true).unwrap();
    // Idle drift off so the runs below are fully determined by the jump.
    engine.input.pause();
    engine
}

#[test]
fn hundred_step_run_with_target_jump() {
    let content_height = 2000.0;
    let mut engine = engine(content_height);
    let mut target = MemoryTarget::default();
    let mut shared = ScrollState::default();

    engine.physics.target = engine.physics.current + 5000.0;

    let mut wraps = 0;
    let mut saw_scrolling = false;
    let mut settled_at = None;
    for step in 0..100 {
        let report = engine.frame(DT, &mut target, &mut shared);
        assert!(report.stepped);
        wraps += report.wraps.len();

        if step == 0 {
            assert!(shared.is_scrolling, "motion must start within one step");
        }
        saw_scrolling |= shared.is_scrolling;

        // Wrap correction runs inside the step, so an observed position at
        // or past the seam means a wrap event went unrecorded.
        assert!(
            engine.physics.current < content_height * WRAP_SEED_FACTOR,
            "step {step}: current {} at/past the seam",
            engine.physics.current
        );

        if settled_at.is_none() && !shared.is_scrolling && step > 0 {
            settled_at = Some(step);
        }
    }

    assert!(saw_scrolling);
    assert!(
        settled_at.is_some(),
        "column never settled within 100 steps"
    );
    // Seeded exactly at the seam, a +5000 px jump crosses it immediately
    // and then once per content height: three wraps in total.
    assert_eq!(wraps, 3);
    assert!((engine.physics.target - engine.physics.current).abs() < 0.1);
    assert_eq!(shared.velocity, 0.0);
}

#[test]
fn transform_writes_are_memoized_after_settle() {
    let mut engine = engine(50_000.0);
    let mut target = MemoryTarget::default();
    let mut shared = ScrollState::default();

    engine.physics.target = engine.physics.current + 300.0;
    for _ in 0..120 {
        engine.frame(DT, &mut target, &mut shared);
    }
    let writes_at_settle = target.transforms.len();
    assert!(writes_at_settle > 0);

    for _ in 0..30 {
        engine.frame(DT, &mut target, &mut shared);
    }
    assert_eq!(
        target.transforms.len(),
        writes_at_settle,
        "settled frames must not touch the transform"
    );
}

#[test]
fn settle_reset_pass_runs_exactly_once() {
    let mut engine = engine(50_000.0);
    let mut target = MemoryTarget::default();
    let mut shared = ScrollState::default();

    // Prime one frame so the seed position (which sits exactly on the
    // wrap bound) settles into the buffer before baselines are captured.
    engine.frame(DT, &mut target, &mut shared);

    // Baselines sit around the current scroll position so the lines start
    // inside the viewport window.
    let base = engine.physics.current;
    engine.lines.install([base + 100.0, base + 400.0, base + 700.0]);
    engine.physics.target = engine.physics.current + 200.0;

    for _ in 0..200 {
        engine.frame(DT, &mut target, &mut shared);
    }
    assert_eq!(target.resets, 1, "overlapping resets must never stack");
    assert!(
        target
            .line_writes
            .iter()
            .any(|(_, w)| matches!(w, LineWrite::Lateral(_))),
        "visible lines should have been offset while moving"
    );
}

#[test]
fn destroyed_engine_stops_producing_writes() {
    let mut engine = engine(2000.0);
    let mut target = MemoryTarget::default();
    let mut shared = ScrollState::default();

    engine.physics.target = engine.physics.current + 500.0;
    engine.frame(DT, &mut target, &mut shared);
    let writes = target.transforms.len();

    engine.destroy();
    let report = engine.frame(DT, &mut target, &mut shared);
    assert!(!report.stepped);
    assert_eq!(target.transforms.len(), writes);
}

#[test]
fn content_rebuild_reseeds_and_rewrites() {
    let mut engine = engine(2000.0);
    let mut target = MemoryTarget::default();
    let mut shared = ScrollState::default();

    engine.frame(DT, &mut target, &mut shared);
    let writes = target.transforms.len();

    engine.reset_content(3000.0).unwrap();
    assert_eq!(engine.physics.current, 6000.0);

    // The memo was dropped with the rebuild, so the next frame writes even
    // though nothing is moving.
    engine.frame(DT, &mut target, &mut shared);
    assert_eq!(target.transforms.len(), writes + 1);
}
