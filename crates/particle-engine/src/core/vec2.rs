//! Out-parameter 2D vector helpers.
//!
//! Every function writes into caller-owned storage so the collision pass can
//! run on pre-allocated scratch vectors without allocating per call.

use glam::Vec2;

/// `out = a - b`
#[inline]
pub fn subtract(out: &mut Vec2, a: Vec2, b: Vec2) {
    out.x = a.x - b.x;
    out.y = a.y - b.y;
}

/// Euclidean length. Zero only for the zero vector; does not underflow for
/// tiny components.
#[inline]
pub fn length(a: Vec2) -> f32 {
    a.x.hypot(a.y)
}

/// `out = a * k`
#[inline]
pub fn scale(out: &mut Vec2, a: Vec2, k: f32) {
    out.x = a.x * k;
    out.y = a.y * k;
}

/// `out = base + dir * k`
#[inline]
pub fn scale_and_add(out: &mut Vec2, base: Vec2, dir: Vec2, k: f32) {
    out.x = base.x + dir.x * k;
    out.y = base.y + dir.y * k;
}

/// Normalize `a` into `out`. Any nonzero vector whose reciprocal length is
/// finite keeps its direction, however short. Otherwise `out` is set to
/// `fallback` and `false` is returned.
#[inline]
pub fn normalize_or(out: &mut Vec2, a: Vec2, fallback: Vec2) -> bool {
    let len = length(a);
    let rcp = 1.0 / len;
    if len > 0.0 && rcp.is_finite() {
        scale(out, a, rcp);
        true
    } else {
        *out = fallback;
        false
    }
}
