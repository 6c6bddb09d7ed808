// Tests for the easing/tween primitive shared by wheel input and the
// velocity bridge.

use app_core::{Ease, Tween};

#[test]
fn ease_curves_hit_both_endpoints() {
    for ease in [Ease::Linear, Ease::Power1Out, Ease::Power2Out, Ease::QuartOut] {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?} must start at 0");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?} must end at 1");
    }
}

#[test]
fn ease_out_curves_front_load_the_motion() {
    // At the halfway point an ease-out has covered more than half the
    // distance, and higher powers cover more than lower ones.
    let p1 = Ease::Power1Out.apply(0.5);
    let p2 = Ease::Power2Out.apply(0.5);
    let p4 = Ease::QuartOut.apply(0.5);
    assert!(p1 > 0.5);
    assert!(p2 > p1);
    assert!(p4 > p2);
}

#[test]
fn tween_progresses_and_completes() {
    let mut tween = Tween::new(10.0, 20.0, 0.25, Ease::Power1Out);
    assert_eq!(tween.value(), 10.0);

    let mid = tween.step(0.1);
    assert!(mid > 10.0 && mid < 20.0);
    assert!(!tween.is_done());

    tween.step(0.2);
    assert!(tween.is_done());
    assert_eq!(tween.value(), 20.0);
}

#[test]
fn retarget_restarts_from_the_current_value() {
    let mut tween = Tween::new(0.0, 100.0, 0.25, Ease::Power1Out);
    let reached = tween.step(0.1);

    tween.retarget(-50.0, 0.25);
    // The new transition departs from where the old one was interrupted.
    assert_eq!(tween.value(), reached);
    assert_eq!(tween.to(), -50.0);

    tween.step(0.5);
    assert_eq!(tween.value(), -50.0);
}

#[test]
fn out_of_range_time_is_clamped() {
    assert_eq!(Ease::Power2Out.apply(-1.0), 0.0);
    assert_eq!(Ease::Power2Out.apply(2.0), 1.0);
}
