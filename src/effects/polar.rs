//! Coordinate helpers shared by the radial effects.

/// Convert polar coordinates to cartesian coordinates.
/// `cx`, `cy`: center point; `angle`: radians; `radius`: distance from center.
#[inline]
pub fn polar_to_grid(cx: f32, cy: f32, angle: f32, radius: f32) -> (f32, f32) {
    (cx + angle.cos() * radius, cy + angle.sin() * radius)
}

/// Pixel (x, y) relative to `(cx, cy)` in units of the shorter canvas side,
/// returned as `(radius, angle)`.
#[inline]
pub fn to_polar(x: usize, y: usize, cx: f32, cy: f32, unit: f32) -> (f32, f32) {
    let dx = (x as f32 - cx) / unit;
    let dy = (y as f32 - cy) / unit;
    ((dx * dx + dy * dy).sqrt(), dy.atan2(dx))
}

/// Length of the shorter side, never zero.
#[inline]
pub fn unit_length(width: usize, height: usize) -> f32 {
    width.min(height).max(1) as f32
}

/// Deterministic hash of an index into `[0, 1)`.
#[inline]
pub fn hash01(i: u32, seed: u32) -> f32 {
    let mut n = i.wrapping_mul(374_761_393) ^ seed.wrapping_mul(0x9E37_79B9);
    n = (n ^ (n >> 13)).wrapping_mul(1_274_126_177);
    n ^= n >> 16;
    (n & 0x00FF_FFFF) as f32 / 16_777_216.0
}

#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}
