//! Shared scroll state read by every motion-dependent consumer.
//!
//! This type intentionally avoids referencing platform-specific APIs. The web
//! frontend holds one instance per page behind `Rc<RefCell<_>>`; the column
//! that owns the frame tick is the only writer, everything else (line
//! distortion, the GPU layer) reads.

/// Scroll position/velocity snapshot published once per engine frame.
///
/// `velocity` is signed: positive while content travels toward larger scroll
/// offsets, negative on the way back. Consumers that only care about speed
/// take the magnitude.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollState {
    /// Last rendered scroll offset in pixels.
    pub current: f32,
    /// Desired scroll offset, updated by input.
    pub target: f32,
    /// Signed rate of change, bounded to `[-1, 1]`.
    pub velocity: f32,
    /// True while the column is actively settling toward `target`.
    pub is_scrolling: bool,
}
