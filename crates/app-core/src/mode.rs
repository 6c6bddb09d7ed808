//! Desktop/mobile representation switch.
//!
//! Two states, one breakpoint, debounced against resize storms. Every
//! transition bumps a generation counter; deferred work captured before a
//! transition checks the generation before applying, so a resize racing a
//! pending text split can never corrupt state from the other mode.

use crate::constants::{DESKTOP_BREAKPOINT_PX, RESIZE_DEBOUNCE_SEC};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportMode {
    Desktop,
    Mobile,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeTransition {
    ToDesktop,
    ToMobile,
}

#[inline]
pub fn mode_for_width(width: f32) -> ViewportMode {
    if width > DESKTOP_BREAKPOINT_PX {
        ViewportMode::Desktop
    } else {
        ViewportMode::Mobile
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ModeSwitch {
    mode: ViewportMode,
    pending: Option<Pending>,
    generation: u64,
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    width: f32,
    remaining_sec: f32,
}

impl ModeSwitch {
    pub fn new(initial_width: f32) -> Self {
        Self {
            mode: mode_for_width(initial_width),
            pending: None,
            generation: 0,
        }
    }

    pub fn mode(&self) -> ViewportMode {
        self.mode
    }

    /// Epoch for stale-deferred-callback checks.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Record the latest width and (re)arm the debounce window. Repeated
    /// resize events collapse into the final width.
    pub fn observe_resize(&mut self, width: f32) {
        self.pending = Some(Pending {
            width,
            remaining_sec: RESIZE_DEBOUNCE_SEC,
        });
    }

    /// Drive the debounce with frame time. Yields a transition only when
    /// the window elapsed and the breakpoint was actually crossed.
    pub fn tick(&mut self, dt_sec: f32) -> Option<ModeTransition> {
        let pending = self.pending.as_mut()?;
        pending.remaining_sec -= dt_sec;
        if pending.remaining_sec > 0.0 {
            return None;
        }
        let width = pending.width;
        self.pending = None;
        self.apply_width(width)
    }

    /// Consume the pending width immediately, for hosts that run the
    /// debounce on a real timer instead of frame ticks.
    pub fn fire_pending(&mut self) -> Option<ModeTransition> {
        let width = self.pending.take()?.width;
        self.apply_width(width)
    }

    fn apply_width(&mut self, width: f32) -> Option<ModeTransition> {
        let next = mode_for_width(width);
        if next == self.mode {
            return None;
        }
        self.mode = next;
        self.generation += 1;
        log::debug!("[mode] viewport -> {next:?} (generation {})", self.generation);
        Some(match next {
            ViewportMode::Desktop => ModeTransition::ToDesktop,
            ViewportMode::Mobile => ModeTransition::ToMobile,
        })
    }
}
