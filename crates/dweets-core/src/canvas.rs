//! Logical-resolution drawing on top of a physical [`Surface`].
//!
//! Demos think in the resolution they were asked for (`--xres`/`--yres`),
//! while the terminal only offers as many pixels as it has cells. A
//! [`Canvas`] scales every primitive from logical to physical pixels and
//! guarantees that anything with a positive logical size covers at least one
//! physical pixel.

use crate::color::Rgba;
use crate::surface::{PixelRect, Surface};

/// Coordinates beyond this magnitude are clamped before rasterization.
const COORD_LIMIT: f64 = 1.0e6;

/// A drawing target with its own logical resolution.
#[derive(Debug)]
pub struct Canvas<'a> {
    surface: &'a mut Surface,
    width: f64,
    height: f64,
    scale_x: f64,
    scale_y: f64,
}

impl<'a> Canvas<'a> {
    /// Wrap `surface` so that `(width, height)` logical pixels span all of it.
    pub fn new(surface: &'a mut Surface, width: u32, height: u32) -> Self {
        let width = width.max(1) as f64;
        let height = height.max(1) as f64;
        let scale_x = surface.width() as f64 / width;
        let scale_y = surface.height() as f64 / height;
        Self {
            surface,
            width,
            height,
            scale_x,
            scale_y,
        }
    }

    /// Logical width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Logical height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The visible logical area.
    pub fn rect(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width as i32, self.height as i32)
    }

    fn map_x(&self, x: f64) -> i32 {
        (x * self.scale_x).clamp(-COORD_LIMIT, COORD_LIMIT).floor() as i32
    }

    fn map_y(&self, y: f64) -> i32 {
        (y * self.scale_y).clamp(-COORD_LIMIT, COORD_LIMIT).floor() as i32
    }

    fn map_rect(&self, rect: PixelRect) -> PixelRect {
        let x0 = self.map_x(rect.x as f64);
        let y0 = self.map_y(rect.y as f64);
        let x1 = self.map_x(rect.right() as f64).max(x0 + 1);
        let y1 = self.map_y(rect.bottom() as f64).max(y0 + 1);
        PixelRect::new(x0, y0, x1 - x0, y1 - y0)
    }

    fn map_width(&self, width: i32) -> i32 {
        if width < 1 {
            return 0;
        }
        ((width as f64 * self.scale_x.min(self.scale_y)).round() as i32).max(1)
    }

    pub fn fill(&mut self, color: Rgba) {
        self.surface.fill(color);
    }

    /// Fill a logical rect. Empty rects draw nothing.
    pub fn fill_rect(&mut self, rect: PixelRect, color: Rgba) {
        if rect.is_empty() {
            return;
        }
        let mapped = self.map_rect(rect);
        self.surface.fill_rect(mapped, color);
    }

    /// Outline a logical rect with a one physical pixel border.
    pub fn draw_rect(&mut self, rect: PixelRect, color: Rgba) {
        if rect.is_empty() {
            return;
        }
        let mapped = self.map_rect(rect);
        self.surface.draw_rect(mapped, color, 1);
    }

    /// Draw a line of logical `width`. Non-finite endpoints draw nothing.
    pub fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba, width: i32) {
        if !is_finite(from) || !is_finite(to) {
            return;
        }
        let width = self.map_width(width);
        let from = (self.map_x(from.0), self.map_y(from.1));
        let to = (self.map_x(to.0), self.map_y(to.1));
        self.surface.draw_line(from, to, color, width);
    }

    /// Connect logical points into a polyline, skipping non-finite points.
    pub fn draw_polyline(&mut self, points: &[(f64, f64)], closed: bool, color: Rgba, width: i32) {
        let mapped: Vec<(i32, i32)> = points
            .iter()
            .filter(|p| is_finite(**p))
            .map(|&(x, y)| (self.map_x(x), self.map_y(y)))
            .collect();
        let width = self.map_width(width);
        self.surface.draw_polyline(&mapped, closed, color, width);
    }

    /// Draw `image` with its top-left at logical `(x, y)`.
    ///
    /// The image is treated as logical pixels and scaled with nearest-neighbor
    /// sampling, alpha-blended over the current contents.
    pub fn blit(&mut self, image: &Surface, x: i32, y: i32) {
        let dest = self.map_rect(PixelRect::new(
            x,
            y,
            image.width() as i32,
            image.height() as i32,
        ));
        let Some(clip) = dest.intersection(&self.surface.rect()) else {
            return;
        };
        for py in clip.y..clip.bottom() {
            let sy = ((py - dest.y) as f64 / self.scale_y) as i32;
            for px in clip.x..clip.right() {
                let sx = ((px - dest.x) as f64 / self.scale_x) as i32;
                let Some(src) = image.get(sx, sy) else {
                    continue;
                };
                if let Some(dst) = self.surface.get(px, py) {
                    self.surface.set(px, py, src.over(dst));
                }
            }
        }
    }
}

fn is_finite((x, y): (f64, f64)) -> bool {
    x.is_finite() && y.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::rgb(255, 0, 0);

    fn count(surface: &Surface, color: Rgba) -> usize {
        surface.pixels().iter().filter(|&&p| p == color).count()
    }

    #[test]
    fn test_small_rect_covers_one_pixel() {
        let mut surface = Surface::new(80, 60);
        let mut canvas = Canvas::new(&mut surface, 800, 600);
        canvas.fill_rect(PixelRect::new(0, 0, 3, 3), RED);
        assert_eq!(count(&surface, RED), 1);
    }

    #[test]
    fn test_rect_scales() {
        let mut surface = Surface::new(80, 60);
        let mut canvas = Canvas::new(&mut surface, 800, 600);
        canvas.fill_rect(PixelRect::new(400, 300, 100, 100), RED);
        assert_eq!(count(&surface, RED), 100);
        assert_eq!(surface.get(40, 30), Some(RED));
    }

    #[test]
    fn test_negative_rect_draws_nothing() {
        let mut surface = Surface::new(80, 60);
        let mut canvas = Canvas::new(&mut surface, 800, 600);
        canvas.fill_rect(PixelRect::new(400, 300, -100, -100), RED);
        assert_eq!(count(&surface, RED), 0);
    }

    #[test]
    fn test_polyline_skips_non_finite() {
        let mut surface = Surface::new(10, 10);
        let mut canvas = Canvas::new(&mut surface, 10, 10);
        canvas.draw_polyline(
            &[(0.0, 0.0), (f64::NAN, 1.0), (f64::INFINITY, 2.0), (9.0, 0.0)],
            false,
            RED,
            1,
        );
        assert_eq!(count(&surface, RED), 10);
    }

    #[test]
    fn test_huge_line_is_clamped() {
        let mut surface = Surface::new(10, 10);
        let mut canvas = Canvas::new(&mut surface, 10, 10);
        canvas.draw_line((5.0, 5.0), (5.0, 1.0e12), RED, 1);
        assert_eq!(count(&surface, RED), 5);
    }

    #[test]
    fn test_blit_scales_up() {
        let mut surface = Surface::new(20, 20);
        let mut canvas = Canvas::new(&mut surface, 10, 10);
        let image = Surface::filled(2, 2, RED);
        canvas.blit(&image, 1, 1);
        assert_eq!(count(&surface, RED), 16);
        assert_eq!(surface.get(2, 2), Some(RED));
        assert_eq!(surface.get(6, 6), Some(Rgba::TRANSPARENT));
    }
}
