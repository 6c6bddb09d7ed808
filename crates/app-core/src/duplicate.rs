//! Content duplication arithmetic.
//!
//! The DOM side clones a column's children back-to-back so translating by
//! one content height wraps seamlessly; this module owns the sizing math
//! so it can be pinned by host tests.

use thiserror::Error;

use crate::constants::{COPIES_MAX, COPIES_MIN, COPIES_VIEWPORT_FACTOR, WRAP_SEED_FACTOR};

#[derive(Debug, Error)]
pub enum DuplicateError {
    #[error("content height must be positive, got {0}")]
    NonPositiveContentHeight(f32),
    #[error("viewport height must be positive, got {0}")]
    NonPositiveViewportHeight(f32),
}

/// Repetition count for a content block of height `content_height` in a
/// viewport of height `viewport_height`. Over-provisions by a factor of
/// eight so the seam stays out of view at high scroll velocity, capped to
/// bound DOM cost, and never below the two-copy minimum the wrap needs.
pub fn copy_count(content_height: f32, viewport_height: f32) -> Result<usize, DuplicateError> {
    debug_assert!(content_height > 0.0, "content height {content_height}");
    debug_assert!(viewport_height > 0.0, "viewport height {viewport_height}");
    if content_height <= 0.0 {
        return Err(DuplicateError::NonPositiveContentHeight(content_height));
    }
    if viewport_height <= 0.0 {
        return Err(DuplicateError::NonPositiveViewportHeight(viewport_height));
    }
    let copies = ((viewport_height * COPIES_VIEWPORT_FACTOR) / content_height).ceil() as usize + 1;
    Ok(copies.clamp(COPIES_MIN, COPIES_MAX))
}

/// Everything the DOM side needs to materialize the duplicated buffer.
#[derive(Clone, Copy, Debug)]
pub struct DuplicationPlan {
    pub copies: usize,
    /// Scroll offset the column starts at, two content heights in.
    pub seed_offset: f32,
}

impl DuplicationPlan {
    pub fn new(content_height: f32, viewport_height: f32) -> Result<Self, DuplicateError> {
        Ok(Self {
            copies: copy_count(content_height, viewport_height)?,
            seed_offset: content_height * WRAP_SEED_FACTOR,
        })
    }
}
