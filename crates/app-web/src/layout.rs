// Pure quad placement math for the distortion layer. No web types here so
// the host-side tests can include this module directly.

use glam::Vec2;

/// Clip-space rect `[x0, y0, x1, y1]` (left, bottom, right, top) for a
/// CSS-pixel rect inside the viewport.
#[inline]
pub fn quad_clip_rect(left: f32, top: f32, width: f32, height: f32, viewport: Vec2) -> [f32; 4] {
    let vw = viewport.x.max(1.0);
    let vh = viewport.y.max(1.0);
    let x0 = left / vw * 2.0 - 1.0;
    let x1 = (left + width) / vw * 2.0 - 1.0;
    let y0 = 1.0 - (top + height) / vh * 2.0;
    let y1 = 1.0 - top / vh * 2.0;
    [x0, y0, x1, y1]
}

/// UV scale/offset pair implementing `object-fit: cover`: the texture is
/// scaled so the quad is fully covered, then the overflow is cropped
/// symmetrically. `uv' = uv * scale + offset`.
#[inline]
pub fn cover_uv_transform(texture_size: Vec2, quad_size: Vec2) -> (Vec2, Vec2) {
    let tex_aspect = texture_size.x / texture_size.y.max(1.0);
    let quad_aspect = quad_size.x / quad_size.y.max(1.0);
    if tex_aspect > quad_aspect {
        // Texture is wider: crop left/right.
        let sx = quad_aspect / tex_aspect;
        (Vec2::new(sx, 1.0), Vec2::new((1.0 - sx) * 0.5, 0.0))
    } else {
        // Texture is taller: crop top/bottom.
        let sy = tex_aspect / quad_aspect.max(f32::EPSILON);
        (Vec2::new(1.0, sy), Vec2::new(0.0, (1.0 - sy) * 0.5))
    }
}
