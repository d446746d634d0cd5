use crate::renderer::Canvas;

/// Add a 3x3 box blur of `snapshot` back onto `canvas` at `intensity`.
///
/// The one-pixel border ring is neither sampled nor written. `snapshot` must
/// hold the pre-pass bytes of `canvas`.
pub fn apply(canvas: &mut Canvas, snapshot: &[u8], intensity: f32) {
    let intensity = intensity.clamp(0.0, 1.0);
    if intensity.is_nan() || intensity <= 0.0 {
        return;
    }
    let (w, h) = (canvas.width(), canvas.height());
    if w < 3 || h < 3 {
        return;
    }

    let stride = w * 4;
    let out = canvas.as_bytes_mut();
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let i = y * stride + x * 4;
            for ch in 0..3 {
                let mut sum = 0u32;
                for row in [i - stride, i, i + stride] {
                    sum += snapshot[row - 4 + ch] as u32 + snapshot[row + ch] as u32 + snapshot[row + 4 + ch] as u32;
                }
                let blur = sum as f32 / 9.0;
                out[i + ch] = (snapshot[i + ch] as f32 + blur * intensity).min(255.0) as u8;
            }
        }
    }
}
