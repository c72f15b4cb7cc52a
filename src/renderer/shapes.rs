//! Per-frame geometry and color derivation
//!
//! Pure CPU-side helpers: window-space to NDC mapping, the segment quad
//! rebuilt every frame, and a reference implementation of the disc
//! gradient evaluated per pixel in `circle.wgsl`.

use crate::consts::*;

use super::vertex::{Vertex, colors};

/// Static full-viewport quad the circle pass draws over
pub const FULLSCREEN_QUAD: [Vertex; 4] = [
    Vertex::new(-1.0, -1.0),
    Vertex::new(1.0, -1.0),
    Vertex::new(1.0, 1.0),
    Vertex::new(-1.0, 1.0),
];

/// Index list for the full-viewport quad, two triangles
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 3, 0];

/// Convert a window-space coordinate (pixels, y up) to NDC
#[inline]
pub fn to_ndc(v: f32) -> f32 {
    v / WINDOW_SIZE * 2.0 - 1.0
}

/// Corner vertices for the segment at vertical center `y`, ordered for
/// a triangle strip: bottom-left, bottom-right, top-left, top-right.
/// The segment spans `SEGMENT_LENGTH` horizontally, centered.
pub fn segment_quad(y: f32) -> [Vertex; 4] {
    let left = to_ndc((WINDOW_SIZE - SEGMENT_LENGTH) / 2.0);
    let right = to_ndc((WINDOW_SIZE + SEGMENT_LENGTH) / 2.0);
    let bottom = to_ndc(y - SEGMENT_THICKNESS / 2.0);
    let top = to_ndc(y + SEGMENT_THICKNESS / 2.0);

    [
        Vertex::new(left, bottom),
        Vertex::new(right, bottom),
        Vertex::new(left, top),
        Vertex::new(right, top),
    ]
}

/// CPU reference for the gradient in `circle.wgsl`: a pixel at `dist`
/// from the center blends linearly from the center color (dist 0) to
/// the border color (dist == radius); beyond the radius it falls
/// through to the background.
pub fn shade_distance(dist: f32, radius: f32) -> [f32; 4] {
    if dist <= radius {
        let t = dist / radius;
        let mut out = [0.0; 4];
        for (i, channel) in out.iter_mut().enumerate() {
            *channel = colors::CIRCLE_CENTER[i] * (1.0 - t) + colors::CIRCLE_BORDER[i] * t;
        }
        out
    } else {
        colors::BACKGROUND
    }
}
