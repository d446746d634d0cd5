use crate::renderer::Canvas;

/// Pixel offset for an aberration `intensity` on a canvas `width` wide.
pub fn offset_for(intensity: f32, width: usize) -> usize {
    let intensity = if intensity.is_nan() { 0.0 } else { intensity.clamp(0.0, 0.05) };
    (intensity * width as f32).round() as usize
}

/// Red from `x - offset`, green from `x`, blue from `x + offset`. Samples
/// clamp to the row; `snapshot` holds the pre-pass bytes.
pub fn shift_channels(canvas: &mut Canvas, snapshot: &[u8], offset: usize) {
    if offset == 0 {
        return;
    }
    let w = canvas.width();
    let last = w - 1;
    let out = canvas.as_bytes_mut();
    for (y, row) in out.chunks_exact_mut(w * 4).enumerate() {
        let src = &snapshot[y * w * 4..(y + 1) * w * 4];
        for x in 0..w {
            let red_x = x.saturating_sub(offset);
            let blue_x = (x + offset).min(last);
            row[x * 4] = src[red_x * 4];
            row[x * 4 + 2] = src[blue_x * 4 + 2];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn offset_rounds_against_width() {
        assert_eq!(offset_for(0.0, 640), 0);
        assert_eq!(offset_for(0.01, 640), 6);
        assert_eq!(offset_for(1.0, 100), 5);
        assert_eq!(offset_for(f32::NAN, 100), 0);
    }

    #[test]
    fn edges_clamp_instead_of_wrapping() {
        let mut canvas = Canvas::new(4, 1);
        canvas.put_pixel(0, 0, Rgb::new(200, 0, 0));
        canvas.put_pixel(3, 0, Rgb::new(0, 0, 100));
        let snapshot = canvas.as_bytes().to_vec();
        shift_channels(&mut canvas, &snapshot, 2);
        assert_eq!(canvas.get_pixel(0, 0).r, 200);
        assert_eq!(canvas.get_pixel(1, 0).r, 200);
        assert_eq!(canvas.get_pixel(3, 0).b, 100);
        assert_eq!(canvas.get_pixel(2, 0).b, 100);
        assert_eq!(canvas.get_pixel(0, 0).b, 0);
    }
}
