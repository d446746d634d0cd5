//! Owned pixel surface shared by every stage of the frame pipeline.
//!
//! Effects render into a `Canvas`, post passes mutate it in place, and the
//! presentation manager copies whole canvases between buffer roles.

use crate::color::Rgb;
use crate::error::EngineError;

/// Owned RGBA pixel buffer.
///
/// Internal format is 4 bytes per pixel in **RGBA** order, row-major. The
/// core always writes alpha as 255.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl Canvas {
    /// Allocate an opaque black canvas. The engine allocates through
    /// [`Canvas::try_new`]; this is for fixed, known-small sizes.
    ///
    /// # Panics
    ///
    /// If `width * height * 4` overflows `usize`, or the allocation fails.
    pub fn new(width: usize, height: usize) -> Self {
        let bytes = width
            .checked_mul(height)
            .and_then(|px| px.checked_mul(4))
            .unwrap_or_else(|| panic!("canvas size {}x{} overflows usize", width, height));
        let mut canvas = Self {
            data: vec![0u8; bytes],
            width,
            height,
        };
        canvas.clear();
        canvas
    }

    /// Allocate an opaque black canvas, reporting allocation failure instead
    /// of aborting.
    pub fn try_new(width: usize, height: usize) -> Result<Self, EngineError> {
        let bytes = Self::byte_len(width, height)?;
        let mut data = Vec::new();
        data.try_reserve_exact(bytes)
            .map_err(|e| EngineError::Allocation {
                bytes,
                reason: e.to_string(),
            })?;
        data.resize(bytes, 0);
        let mut canvas = Self { data, width, height };
        canvas.clear();
        Ok(canvas)
    }

    /// Bytes needed for a `width x height` surface.
    pub fn byte_len(width: usize, height: usize) -> Result<usize, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidSize { width, height });
        }
        width
            .checked_mul(height)
            .and_then(|px| px.checked_mul(4))
            .ok_or(EngineError::InvalidSize { width, height })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Check that the backing storage matches the declared dimensions.
    pub fn validate(&self) -> Result<(), EngineError> {
        let expected = self.width * self.height * 4;
        if self.data.len() != expected {
            return Err(EngineError::BufferSize {
                expected,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    /// Clear the canvas to opaque black.
    #[inline]
    pub fn clear(&mut self) {
        self.fill(Rgb::BLACK);
    }

    pub fn fill(&mut self, color: Rgb) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.r, color.g, color.b, 255]);
        }
    }

    /// Write a pixel at (x, y). Out-of-bounds writes are ignored.
    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            self.data[idx..idx + 4].copy_from_slice(&[color.r, color.g, color.b, 255]);
        }
    }

    /// Combine `color` with the existing pixel by channel-wise maximum.
    #[inline]
    pub fn max_pixel(&mut self, x: isize, y: isize, color: Rgb) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            let current = self.get_pixel(x, y);
            self.put_pixel(x, y, current.max(color));
        }
    }

    /// Read the color at (x, y). Out-of-bounds reads return black.
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> Rgb {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            Rgb::new(self.data[idx], self.data[idx + 1], self.data[idx + 2])
        } else {
            Rgb::BLACK
        }
    }

    /// Fill the rectangle `[x, x + w) x [y, y + h)`, clipped to the canvas.
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: Rgb) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for row in y.min(y_end)..y_end {
            let start = (row * self.width + x.min(x_end)) * 4;
            let end = (row * self.width + x_end) * 4;
            for px in self.data[start..end].chunks_exact_mut(4) {
                px.copy_from_slice(&[color.r, color.g, color.b, 255]);
            }
        }
    }

    /// Mutable view of one row of pixels.
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let stride = self.width * 4;
        &mut self.data[y * stride..(y + 1) * stride]
    }

    /// Full-surface copy. Dimensions must match.
    pub fn copy_from(&mut self, src: &Canvas) -> Result<(), EngineError> {
        if src.data.len() != self.data.len() || src.width != self.width {
            return Err(EngineError::BufferSize {
                expected: self.data.len(),
                actual: src.data.len(),
            });
        }
        self.data.copy_from_slice(&src.data);
        Ok(())
    }
}

/// Write `shade(x, y)` into every pixel exactly once, row-major.
pub fn fill_pixels<F>(canvas: &mut Canvas, mut shade: F)
where
    F: FnMut(usize, usize) -> Rgb,
{
    let width = canvas.width;
    for (i, px) in canvas.data.chunks_exact_mut(4).enumerate() {
        let c = shade(i % width, i / width);
        px.copy_from_slice(&[c.r, c.g, c.b, 255]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_canvas_is_opaque_black() {
        let c = Canvas::new(3, 2);
        assert_eq!(c.as_bytes().len(), 24);
        assert!(c.as_bytes().chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
    }

    #[test]
    #[should_panic(expected = "overflows")]
    fn new_refuses_overflowing_sizes() {
        Canvas::new(usize::MAX / 2, 3);
    }

    #[test]
    fn try_new_rejects_empty_surfaces() {
        assert!(matches!(
            Canvas::try_new(0, 10),
            Err(EngineError::InvalidSize { .. })
        ));
        assert!(Canvas::try_new(usize::MAX, 2).is_err());
    }

    #[test]
    fn out_of_bounds_access_is_ignored() {
        let mut c = Canvas::new(2, 2);
        c.put_pixel(5, 0, Rgb::WHITE);
        c.max_pixel(-1, 0, Rgb::WHITE);
        assert_eq!(c.get_pixel(9, 9), Rgb::BLACK);
        assert!(c.as_bytes().chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
    }

    #[test]
    fn fill_rect_clips() {
        let mut c = Canvas::new(4, 4);
        c.fill_rect(2, 2, 10, 10, Rgb::WHITE);
        assert_eq!(c.get_pixel(1, 1), Rgb::BLACK);
        assert_eq!(c.get_pixel(3, 3), Rgb::WHITE);
        assert_eq!(c.get_pixel(2, 3), Rgb::WHITE);
    }

    #[test]
    fn fill_pixels_visits_each_pixel_once() {
        let mut c = Canvas::new(5, 3);
        let mut visits = 0;
        fill_pixels(&mut c, |x, y| {
            visits += 1;
            Rgb::new(x as u8, y as u8, 0)
        });
        assert_eq!(visits, 15);
        assert_eq!(c.get_pixel(4, 2), Rgb::new(4, 2, 0));
    }

    #[test]
    fn copy_requires_matching_size() {
        let mut a = Canvas::new(2, 2);
        let b = Canvas::new(3, 2);
        assert!(a.copy_from(&b).is_err());
    }
}
