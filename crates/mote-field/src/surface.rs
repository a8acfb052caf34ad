//! Device-resolution pixel buffer with a logical coordinate space.
//!
//! Drawing calls take logical coordinates; the surface scales them by its
//! pixel ratio and rasterizes with per-pixel coverage, so shapes thinner or
//! smaller than a device pixel still leave a faint mark.

use crate::color::{Rgb, Rgba};
use crate::paint::Paint;

/// Pixel buffer that is composited into, never cleared between frames.
#[derive(Debug, Clone)]
pub struct Surface {
    width: usize,
    height: usize,
    /// Device pixels per logical pixel.
    ratio: f32,
    pixels: Vec<Rgb>,
}

impl Surface {
    /// Allocate a `width`×`height` device buffer filled with `base`.
    ///
    /// Returns `None` when there is nothing to draw on.
    pub fn new(width: usize, height: usize, ratio: f32, base: Rgb) -> Option<Self> {
        if width == 0 || height == 0 || !(ratio > 0.0) {
            return None;
        }
        Some(Self {
            width,
            height,
            ratio,
            pixels: vec![base; width * height],
        })
    }

    /// Reallocate when the device size or ratio changed. Returns whether the
    /// buffer was replaced; invalid sizes are ignored.
    pub fn resize(&mut self, width: usize, height: usize, ratio: f32, base: Rgb) -> bool {
        if (width, height) == (self.width, self.height) && ratio == self.ratio {
            return false;
        }
        match Self::new(width, height, ratio, base) {
            Some(surface) => {
                *self = surface;
                true
            }
            None => false,
        }
    }

    /// Device size in pixels.
    pub fn device_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    /// Size in logical pixels.
    pub fn logical_size(&self) -> (f32, f32) {
        (
            self.width as f32 / self.ratio,
            self.height as f32 / self.ratio,
        )
    }

    /// Device pixel at column `x`, row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Composite `paint` over the whole surface.
    pub fn fill(&mut self, paint: &Paint) {
        for y in 0..self.height {
            for x in 0..self.width {
                let (lx, ly) = self.logical_center(x, y);
                if let Some(color) = paint.sample(lx, ly) {
                    self.blend(x, y, color, 1.0);
                }
            }
        }
    }

    /// Composite a disc of `radius` logical px centered on (`cx`, `cy`).
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint) {
        let (dcx, dcy) = (cx * self.ratio, cy * self.ratio);
        let dr = radius * self.ratio;
        let Some((x0, x1, y0, y1)) = self.device_box(dcx - dr, dcy - dr, dcx + dr, dcy + dr)
        else {
            return;
        };

        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - dcx;
                let dy = y as f32 + 0.5 - dcy;
                let coverage = (dr + 0.5 - (dx * dx + dy * dy).sqrt()).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                let (lx, ly) = self.logical_center(x, y);
                if let Some(color) = paint.sample(lx, ly) {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }

    /// Stroke a segment `width` logical px wide in a solid color.
    pub fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Rgba) {
        let (ax, ay) = (from.0 * self.ratio, from.1 * self.ratio);
        let (bx, by) = (to.0 * self.ratio, to.1 * self.ratio);
        let half = width * self.ratio / 2.0;
        let Some((x0, x1, y0, y1)) = self.device_box(
            ax.min(bx) - half,
            ay.min(by) - half,
            ax.max(bx) + half,
            ay.max(by) + half,
        ) else {
            return;
        };

        let (ex, ey) = (bx - ax, by - ay);
        let len2 = ex * ex + ey * ey;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let px = x as f32 + 0.5 - ax;
                let py = y as f32 + 0.5 - ay;
                let t = if len2 > 0.0 {
                    ((px * ex + py * ey) / len2).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let (qx, qy) = (px - ex * t, py - ey * t);
                let coverage = (half + 0.5 - (qx * qx + qy * qy).sqrt()).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }

    fn blend(&mut self, x: usize, y: usize, color: Rgba, coverage: f32) {
        let idx = y * self.width + x;
        self.pixels[idx] = self.pixels[idx].blend(color, coverage);
    }

    fn logical_center(&self, x: usize, y: usize) -> (f32, f32) {
        (
            (x as f32 + 0.5) / self.ratio,
            (y as f32 + 0.5) / self.ratio,
        )
    }

    /// Inclusive device pixel range touched by a device-space box grown by
    /// one pixel for antialiasing, or `None` when it misses the buffer.
    fn device_box(
        &self,
        min_x: f32,
        min_y: f32,
        max_x: f32,
        max_y: f32,
    ) -> Option<(usize, usize, usize, usize)> {
        let (w, h) = (self.width as f32, self.height as f32);
        if max_x + 1.0 < 0.0 || max_y + 1.0 < 0.0 || min_x - 1.0 >= w || min_y - 1.0 >= h {
            return None;
        }
        let x0 = (min_x - 1.0).floor().max(0.0) as usize;
        let y0 = (min_y - 1.0).floor().max(0.0) as usize;
        let x1 = ((max_x + 1.0).ceil() as usize).min(self.width - 1);
        let y1 = ((max_y + 1.0).ceil() as usize).min(self.height - 1);
        Some((x0, x1, y0, y1))
    }
}
