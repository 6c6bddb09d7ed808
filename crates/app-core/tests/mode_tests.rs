// Tests for the desktop/mobile switch: debounce, idempotence, and the
// generation counter stale deferred callbacks check against.

use app_core::{mode_for_width, ModeSwitch, ModeTransition, ViewportMode, RESIZE_DEBOUNCE_SEC};

#[test]
fn initial_mode_follows_width() {
    assert_eq!(mode_for_width(1280.0), ViewportMode::Desktop);
    assert_eq!(mode_for_width(768.0), ViewportMode::Mobile);
    assert_eq!(mode_for_width(360.0), ViewportMode::Mobile);
    assert_eq!(ModeSwitch::new(1024.0).mode(), ViewportMode::Desktop);
    assert_eq!(ModeSwitch::new(375.0).mode(), ViewportMode::Mobile);
}

#[test]
fn transition_waits_for_the_debounce_window() {
    let mut switch = ModeSwitch::new(1024.0);
    switch.observe_resize(500.0);

    assert_eq!(switch.tick(RESIZE_DEBOUNCE_SEC * 0.5), None);
    assert_eq!(
        switch.tick(RESIZE_DEBOUNCE_SEC),
        Some(ModeTransition::ToMobile)
    );
    assert_eq!(switch.mode(), ViewportMode::Mobile);
}

#[test]
fn same_mode_resize_is_a_noop() {
    let mut switch = ModeSwitch::new(1024.0);
    switch.observe_resize(500.0);
    assert_eq!(switch.fire_pending(), Some(ModeTransition::ToMobile));
    let generation = switch.generation();

    // Already mobile: a second shrink changes nothing.
    switch.observe_resize(400.0);
    assert_eq!(switch.fire_pending(), None);
    assert_eq!(switch.generation(), generation);
}

#[test]
fn resize_storm_collapses_to_the_final_width() {
    let mut switch = ModeSwitch::new(1024.0);
    // Dips below the breakpoint mid-storm but ends above it.
    switch.observe_resize(500.0);
    switch.observe_resize(700.0);
    switch.observe_resize(1200.0);
    assert_eq!(switch.fire_pending(), None);
    assert_eq!(switch.mode(), ViewportMode::Desktop);
}

#[test]
fn each_transition_bumps_the_generation() {
    let mut switch = ModeSwitch::new(1024.0);
    assert_eq!(switch.generation(), 0);

    switch.observe_resize(500.0);
    switch.fire_pending();
    assert_eq!(switch.generation(), 1);

    switch.observe_resize(1400.0);
    switch.fire_pending();
    assert_eq!(switch.generation(), 2);

    // A stale deferred callback holding generation 1 must now refuse to
    // apply its captured lines.
    assert_ne!(switch.generation(), 1);
}

#[test]
fn pending_without_resize_yields_nothing() {
    let mut switch = ModeSwitch::new(1024.0);
    assert_eq!(switch.tick(1.0), None);
    assert_eq!(switch.fire_pending(), None);
}
