// Tests for the input mapping layer: wheel clamping and direction
// symmetry, touch deltas, the wheel tween's overwrite semantics, and the
// clone-index -> source-record mapping.

use app_core::{
    project_for_clone, shared_velocity, touch_target_delta, wheel_target_delta, InputMapper,
    ScrollPhysics, WHEEL_MAX_DELTA, WHEEL_MULTIPLIER,
};

const DT: f32 = 1.0 / 60.0;

fn tall_physics() -> ScrollPhysics {
    // Tall content keeps wraps out of these tests.
    ScrollPhysics::new(100_000.0).unwrap()
}

#[test]
fn wheel_deltas_are_sign_inverse_across_directions() {
    for raw in [-300.0, -90.0, -12.5, 1.0, 48.0, 90.0, 2000.0] {
        let normal = wheel_target_delta(raw, false);
        let reversed = wheel_target_delta(raw, true);
        assert_eq!(
            normal, -reversed,
            "raw {raw}: opposite columns must get exact sign-inverse deltas"
        );
    }
}

#[test]
fn wheel_delta_clamps_magnitude() {
    let expected = WHEEL_MAX_DELTA * WHEEL_MULTIPLIER;
    assert_eq!(wheel_target_delta(5000.0, true), expected);
    assert_eq!(wheel_target_delta(-5000.0, true), -expected);
    // Below the clamp the raw value passes through scaled.
    assert_eq!(wheel_target_delta(50.0, true), 50.0 * WHEEL_MULTIPLIER);
}

#[test]
fn touch_delta_follows_finger_direction() {
    // Finger moving up (decreasing client Y) scrolls content forward.
    assert_eq!(touch_target_delta(200.0, 150.0, false), 50.0);
    assert_eq!(touch_target_delta(200.0, 150.0, true), -50.0);
    assert_eq!(touch_target_delta(150.0, 200.0, false), -50.0);
}

#[test]
fn shared_velocity_is_signed_and_bounded() {
    assert_eq!(shared_velocity(100.0, 0.0), 1.0);
    assert_eq!(shared_velocity(-100.0, 0.0), -1.0);
    assert_eq!(shared_velocity(5.0, 0.0), 0.5);
    assert!(shared_velocity(0.05, 0.0).abs() < 0.01);
}

#[test]
fn clone_index_maps_back_through_modulo() {
    assert_eq!(project_for_clone(0, 7), Some(0));
    assert_eq!(project_for_clone(6, 7), Some(6));
    assert_eq!(project_for_clone(7, 7), Some(0));
    assert_eq!(project_for_clone(23, 7), Some(2));
    assert_eq!(project_for_clone(3, 0), None);
}

#[test]
fn wheel_tween_reaches_full_delta() {
    let mut physics = tall_physics();
    let start = physics.target;
    let mut input = InputMapper::new(false);
    input.pause(); // hold idle drift out of the measurement

    input.on_wheel(50.0, &physics);
    let expected = start + wheel_target_delta(50.0, false);

    // Run well past the tween duration.
    for _ in 0..30 {
        input.tick(DT, &mut physics);
    }
    assert!(
        (physics.target - expected).abs() < 1e-3,
        "target {} never reached {}",
        physics.target,
        expected
    );
}

#[test]
fn second_wheel_burst_overwrites_the_first() {
    let mut physics = tall_physics();
    let start = physics.target;
    let mut input = InputMapper::new(false);
    input.pause();

    // Two bursts with no time in between: the first burst's transition has
    // made no progress, so its contribution is discarded entirely.
    input.on_wheel(50.0, &physics);
    input.on_wheel(50.0, &physics);
    for _ in 0..30 {
        input.tick(DT, &mut physics);
    }
    let expected = start + wheel_target_delta(50.0, false);
    assert!(
        (physics.target - expected).abs() < 1e-3,
        "bursts must overwrite, not queue: target {} expected {}",
        physics.target,
        expected
    );
}

#[test]
fn settle_timer_reenables_idle_drift() {
    let mut physics = tall_physics();
    let mut input = InputMapper::new(false);

    input.on_wheel(10.0, &physics);
    assert!(input.user_scrolling());
    assert!(!input.auto_scroll());

    // 150 ms of quiet flips the flags back exactly once.
    let mut settle_edges = 0;
    for _ in 0..30 {
        if input.tick(DT, &mut physics) {
            settle_edges += 1;
        }
    }
    assert_eq!(settle_edges, 1);
    assert!(!input.user_scrolling());
    assert!(input.auto_scroll());
}

#[test]
fn touch_sequence_accumulates_into_target() {
    let mut physics = tall_physics();
    let start = physics.target;
    let mut input = InputMapper::new(false);

    input.on_touch_start(300.0);
    assert!(!input.auto_scroll(), "touch start suspends idle drift");
    input.on_touch_move(280.0, &mut physics);
    input.on_touch_move(250.0, &mut physics);
    assert_eq!(physics.target, start + 50.0);

    input.on_touch_end();
    assert!(input.auto_scroll(), "touch end resumes idle drift");
}

#[test]
fn idle_drift_advances_target_while_unpaused() {
    let mut physics = tall_physics();
    let start = physics.target;
    let mut input = InputMapper::new(false);

    for _ in 0..60 {
        input.tick(DT, &mut physics);
    }
    assert!(physics.target > start, "ambient motion must advance the target");

    // Reversed columns drift the opposite way.
    let mut physics = tall_physics();
    let start = physics.target;
    let mut input = InputMapper::new(true);
    for _ in 0..60 {
        input.tick(DT, &mut physics);
    }
    assert!(physics.target < start);
}
