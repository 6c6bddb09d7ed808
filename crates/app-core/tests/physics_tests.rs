// Tests for the damped scroll integration: wrap arithmetic, convergence,
// and the velocity bounds the dependent effects rely on.

use app_core::{copy_count, ScrollPhysics, WrapEdge, WRAP_SEED_FACTOR};

#[test]
fn position_seeds_two_content_heights_in() {
    let physics = ScrollPhysics::new(500.0).unwrap();
    assert_eq!(physics.current, 500.0 * WRAP_SEED_FACTOR);
    assert_eq!(physics.target, physics.current);
    assert_eq!(physics.velocity, 0.0);
}

#[test]
fn wrap_invariant_holds_across_driven_steps() {
    // Content short enough to wrap often; viewport tall enough that the
    // duplication formula caps out.
    let content_height = 500.0;
    let copies = copy_count(content_height, 1000.0).unwrap();
    assert!(copies >= 2);

    let mut physics = ScrollPhysics::new(content_height).unwrap();
    for step in 0..600 {
        if step % 10 == 0 {
            physics.target += 400.0;
        }
        physics.step();
        assert!(
            physics.current >= 0.0 && physics.current < content_height * copies as f32,
            "step {}: current {} escaped [0, {})",
            step,
            physics.current,
            content_height * copies as f32
        );
    }

    // Same invariant scrolling the other way.
    let mut physics = ScrollPhysics::new(content_height).unwrap();
    for step in 0..600 {
        if step % 10 == 0 {
            physics.target -= 400.0;
        }
        physics.step();
        assert!(
            physics.current >= 0.0 && physics.current < content_height * copies as f32,
            "step {}: current {} escaped the buffer scrolling up",
            step,
            physics.current
        );
    }
}

#[test]
fn settle_converges_monotonically() {
    // Tall content so no wrap interferes with the measurement.
    let mut physics = ScrollPhysics::new(10_000.0).unwrap();
    physics.target = physics.current + 500.0;

    let mut previous = (physics.target - physics.current).abs();
    let mut settled_at = None;
    for step in 0..120 {
        physics.step();
        let remaining = (physics.target - physics.current).abs();
        assert!(
            remaining <= previous + 1e-3,
            "step {}: |delta| grew from {} to {}",
            step,
            previous,
            remaining
        );
        previous = remaining;
        if remaining < 0.1 {
            settled_at = Some(step);
            break;
        }
    }
    assert!(
        settled_at.is_some(),
        "did not converge within 120 steps, remaining {previous}"
    );
}

#[test]
fn velocity_stays_in_unit_range() {
    let mut physics = ScrollPhysics::new(10_000.0).unwrap();
    physics.target = physics.current + 100_000.0;
    for step in 0..200 {
        physics.step();
        assert!(
            (0.0..=1.0).contains(&physics.velocity),
            "step {}: velocity {} out of [0, 1]",
            step,
            physics.velocity
        );
    }
}

#[test]
fn wrap_halves_velocity_at_the_seam() {
    // A huge forward delta keeps the pre-wrap velocity pinned at the 1.0
    // ceiling, so the post-wrap value must be exactly 0.5.
    let mut physics = ScrollPhysics::new(2000.0).unwrap();
    physics.target = physics.current + 50_000.0;

    let mut saw_wrap = false;
    for _ in 0..60 {
        let out = physics.step();
        if out.wraps.contains(&WrapEdge::Upper) {
            assert_eq!(physics.velocity, 0.5);
            saw_wrap = true;
            break;
        }
    }
    assert!(saw_wrap, "never reached the upper seam");

    // Symmetric on the way back down.
    let mut physics = ScrollPhysics::new(2000.0).unwrap();
    physics.target = physics.current - 50_000.0;
    let mut saw_wrap = false;
    for _ in 0..60 {
        let out = physics.step();
        if out.wraps.contains(&WrapEdge::Lower) {
            assert_eq!(physics.velocity, 0.5);
            saw_wrap = true;
            break;
        }
    }
    assert!(saw_wrap, "never reached the lower seam");
}

#[test]
fn settled_edge_reports_exactly_once() {
    let mut physics = ScrollPhysics::new(10_000.0).unwrap();
    physics.target = physics.current + 50.0;

    let mut settle_edges = 0;
    for _ in 0..120 {
        let out = physics.step();
        if out.settled {
            settle_edges += 1;
        }
    }
    assert_eq!(settle_edges, 1, "settle must be a one-shot transition edge");
}

#[test]
#[should_panic]
fn non_positive_content_height_is_a_programmer_error() {
    let _ = ScrollPhysics::new(0.0);
}
