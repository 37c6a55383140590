use super::Color;
use crate::geometry::ScreenPoint;

// ============================================================================
// Utility Functions
// ============================================================================

/// Write a packed RGBA8888 pixel to a 4-byte slice
#[inline]
fn write_pixel(dest: &mut [u8], color: Color) {
    dest.copy_from_slice(&color.0.to_ne_bytes());
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// RGBA8888 pixel buffer for software rendering
/// This is the frame the wireframe is rasterized into before presentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Create a new pixel buffer with custom resolution, cleared to transparent black
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && x < i64::from(self.width) && y >= 0 && y < i64::from(self.height)
    }

    /// Check if a screen point is within bounds
    #[inline]
    pub fn contains(&self, p: ScreenPoint) -> bool {
        self.in_bounds(i64::from(p.x), i64::from(p.y))
    }

    /// Calculate byte offset for pixel at (x, y)
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Clear to a solid color
    pub fn clear(&mut self, color: Color) {
        let pixel = color.0.to_ne_bytes();
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&pixel);
        }
    }

    /// Set a single pixel (bounds checked, out-of-range writes are dropped)
    #[inline]
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Color) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            write_pixel(&mut self.pixels[idx..idx + 4], color);
        }
    }

    /// Read a pixel from the buffer (bounds checked)
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: i64, y: i64) -> Option<Color> {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(&self.pixels[idx..idx + 4]);
            Some(Color(u32::from_ne_bytes(bytes)))
        } else {
            None
        }
    }

    /// Draw a line using integer Bresenham stepping.
    ///
    /// The axis with the larger absolute delta is the primary axis (x on ties). The
    /// cursor advances one pixel along it per iteration; the error term accumulates the
    /// minor delta and the minor axis steps once the error reaches the major delta.
    /// Both endpoints are drawn. Pixels outside the buffer are dropped.
    pub fn draw_line(&mut self, p0: ScreenPoint, p1: ScreenPoint, color: Color) {
        let (x0, y0) = (i64::from(p0.x), i64::from(p0.y));
        let (x1, y1) = (i64::from(p1.x), i64::from(p1.y));

        if x0 == x1 && y0 == y1 {
            self.set_pixel(x0, y0, color);
            return;
        }

        let dx = x1 - x0;
        let dy = y1 - y0;
        let step_x = if dx < 0 { -1 } else { 1 };
        let step_y = if dy < 0 { -1 } else { 1 };
        let (adx, ady) = (dx.abs(), dy.abs());

        let mut err = 0i64;
        let (mut x, mut y) = (x0, y0);

        if adx >= ady {
            tracing::trace!(dx, dy, "line: x is the primary axis");
            while x != x1 {
                self.set_pixel(x, y, color);
                err += ady;
                if err >= adx {
                    err -= adx;
                    y += step_y;
                }
                x += step_x;
            }
        } else {
            tracing::trace!(dx, dy, "line: y is the primary axis");
            while y != y1 {
                self.set_pixel(x, y, color);
                err += adx;
                if err >= ady {
                    err -= ady;
                    x += step_x;
                }
                y += step_y;
            }
        }

        // The cursor now sits on the destination
        self.set_pixel(x, y, color);
    }

    /// Draw a filled circle.
    ///
    /// Scans the bounding box `[cx-r, cx+r) x [cy-r, cy+r)` and sets each pixel whose
    /// squared distance to the center is strictly below `radius^2`.
    pub fn draw_circle(&mut self, center: ScreenPoint, radius: u32, color: Color) {
        let (cx, cy) = (i64::from(center.x), i64::from(center.y));
        let r = i64::from(radius);
        // u32::MAX squared does not fit in i64
        let r_sq = i128::from(radius) * i128::from(radius);

        // Clip the scan box to the buffer so work is bounded by pixels touched
        let x_start = (cx - r).max(0);
        let x_end = (cx + r).min(i64::from(self.width));
        let y_start = (cy - r).max(0);
        let y_end = (cy + r).min(i64::from(self.height));

        for y in y_start..y_end {
            let dy = i128::from(y - cy);
            for x in x_start..x_end {
                let dx = i128::from(x - cx);
                if dx * dx + dy * dy < r_sq {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Raw bytes for SDL texture upload
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Iterate over every pixel as (x, y, color)
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Color)> + '_ {
        let width = self.width.max(1);
        self.pixels.chunks_exact(4).enumerate().map(move |(i, chunk)| {
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(chunk);
            let i = i as u32;
            (i % width, i / width, Color(u32::from_ne_bytes(bytes)))
        })
    }
}
