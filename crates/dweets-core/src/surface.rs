//! RGBA pixel surfaces and primitive drawing.
//!
//! All drawing operations clip against the surface bounds, so callers may pass
//! coordinates that lie partially or entirely off-surface.

use crate::color::Rgba;

/// An integer rectangle in pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rect from floating point values, truncating toward zero.
    pub fn from_f64(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x as i32, y as i32, width as i32, height as i32)
    }

    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether two rects share at least one pixel.
    ///
    /// Empty rects never intersect anything.
    pub fn intersects(&self, other: &PixelRect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// The overlapping region of two rects, if any.
    pub fn intersection(&self, other: &PixelRect) -> Option<PixelRect> {
        if !self.intersects(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(PixelRect::new(x, y, right - x, bottom - y))
    }
}

/// A rectangular buffer of RGBA pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Surface {
    /// Create a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba::TRANSPARENT)
    }

    /// Create a surface filled with a single color.
    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The full extent of the surface.
    pub fn rect(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width as i32, self.height as i32)
    }

    /// Raw pixel rows, top to bottom.
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Resize the surface, discarding its contents.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![Rgba::TRANSPARENT; width as usize * height as usize];
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set a single pixel; out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Fill a rect, clipped to the surface.
    pub fn fill_rect(&mut self, rect: PixelRect, color: Rgba) {
        let Some(clip) = rect.intersection(&self.rect()) else {
            return;
        };
        let stride = self.width as usize;
        for y in clip.y..clip.bottom() {
            let row = y as usize * stride;
            let start = row + clip.x as usize;
            let end = row + clip.right() as usize;
            self.pixels[start..end].fill(color);
        }
    }

    /// Draw the border of a rect with the given line thickness.
    pub fn draw_rect(&mut self, rect: PixelRect, color: Rgba, thickness: i32) {
        if rect.is_empty() || thickness <= 0 {
            return;
        }
        let t = thickness.min(rect.width).min(rect.height);
        self.fill_rect(PixelRect::new(rect.x, rect.y, rect.width, t), color);
        self.fill_rect(
            PixelRect::new(rect.x, rect.bottom() - t, rect.width, t),
            color,
        );
        self.fill_rect(PixelRect::new(rect.x, rect.y, t, rect.height), color);
        self.fill_rect(
            PixelRect::new(rect.right() - t, rect.y, t, rect.height),
            color,
        );
    }

    /// Draw a line between two points using Bresenham's algorithm.
    ///
    /// Lines wider than one pixel are stamped with a square brush. A width
    /// below one draws nothing.
    pub fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgba, width: i32) {
        if width < 1 {
            return;
        }
        let (mut x0, mut y0) = from;
        let (x1, y1) = to;
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        // Bail out early for segments that can never touch the surface.
        let span = PixelRect::new(
            x0.min(x1) - width,
            y0.min(y1) - width,
            dx + 2 * width + 1,
            -dy + 2 * width + 1,
        );
        if !span.intersects(&self.rect()) {
            return;
        }

        loop {
            self.stamp(x0, y0, color, width);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn stamp(&mut self, x: i32, y: i32, color: Rgba, width: i32) {
        if width == 1 {
            self.set(x, y, color);
        } else {
            let half = width / 2;
            self.fill_rect(PixelRect::new(x - half, y - half, width, width), color);
        }
    }

    /// Connect a sequence of points with line segments.
    ///
    /// When `closed` is set, the last point is joined back to the first.
    pub fn draw_polyline(&mut self, points: &[(i32, i32)], closed: bool, color: Rgba, width: i32) {
        if points.len() < 2 {
            return;
        }
        for pair in points.windows(2) {
            self.draw_line(pair[0], pair[1], color, width);
        }
        if closed {
            self.draw_line(points[points.len() - 1], points[0], color, width);
        }
    }

    /// Fill a polygon using even-odd scanline rasterization at pixel centers.
    pub fn fill_polygon(&mut self, points: &[(f64, f64)], color: Rgba) {
        if points.len() < 3 || points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return;
        }
        let min_y = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let max_y = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        let y_start = (min_y.floor() as i64).max(0);
        let y_end = (max_y.ceil() as i64).min(self.height as i64 - 1);

        let mut crossings: Vec<f64> = Vec::with_capacity(points.len());
        for y in y_start..=y_end {
            let sample_y = y as f64 + 0.5;
            crossings.clear();
            for (i, &(x0, y0)) in points.iter().enumerate() {
                let (x1, y1) = points[(i + 1) % points.len()];
                if (y0 <= sample_y && y1 > sample_y) || (y1 <= sample_y && y0 > sample_y) {
                    let t = (sample_y - y0) / (y1 - y0);
                    crossings.push(x0 + t * (x1 - x0));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for span in crossings.chunks_exact(2) {
                // Pixel x is inside when its center x + 0.5 lies in the span.
                let start = (span[0] - 0.5).ceil().max(0.0) as i64;
                let end = ((span[1] - 0.5).ceil() as i64).min(self.width as i64);
                if start < end {
                    let row = y as usize * self.width as usize;
                    self.pixels[row + start as usize..row + end as usize].fill(color);
                }
            }
        }
    }

    /// Alpha-blend `src` onto this surface with its top-left at `(dx, dy)`.
    pub fn blit(&mut self, src: &Surface, dx: i32, dy: i32) {
        self.blit_with(src, dx, dy, |s, d| s.over(d));
    }

    /// Multiply this surface by `src` channel-wise (RGBA multiply blend).
    pub fn blit_multiply(&mut self, src: &Surface, dx: i32, dy: i32) {
        self.blit_with(src, dx, dy, |s, d| d.multiply(s));
    }

    fn blit_with(&mut self, src: &Surface, dx: i32, dy: i32, blend: impl Fn(Rgba, Rgba) -> Rgba) {
        let dst_rect = PixelRect::new(dx, dy, src.width as i32, src.height as i32);
        let Some(clip) = dst_rect.intersection(&self.rect()) else {
            return;
        };
        for y in clip.y..clip.bottom() {
            for x in clip.x..clip.right() {
                let s = src.pixels[(y - dy) as usize * src.width as usize + (x - dx) as usize];
                let i = y as usize * self.width as usize + x as usize;
                self.pixels[i] = blend(s, self.pixels[i]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const RED: Rgba = Rgba::rgb(255, 0, 0);

    fn count(surface: &Surface, color: Rgba) -> usize {
        surface.pixels().iter().filter(|&&p| p == color).count()
    }

    #[test]
    fn test_rect_intersects() {
        let a = PixelRect::new(0, 0, 10, 10);
        assert!(a.intersects(&PixelRect::new(9, 9, 5, 5)));
        assert!(!a.intersects(&PixelRect::new(10, 0, 5, 5)));
        assert!(!a.intersects(&PixelRect::new(2, 2, 0, 5)));
        assert!(!a.intersects(&PixelRect::new(2, 2, -3, -3)));
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut s = Surface::new(10, 10);
        s.fill_rect(PixelRect::new(-5, -5, 10, 10), RED);
        assert_eq!(count(&s, RED), 25);
        s.fill_rect(PixelRect::new(100, 100, 10, 10), RED);
        assert_eq!(count(&s, RED), 25);
    }

    #[test]
    fn test_draw_rect_outline() {
        let mut s = Surface::new(10, 10);
        s.draw_rect(PixelRect::new(0, 0, 10, 10), RED, 1);
        assert_eq!(count(&s, RED), 36);
        assert_eq!(s.get(5, 5), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_draw_line_endpoints() {
        let mut s = Surface::new(10, 10);
        s.draw_line((1, 1), (8, 5), RED, 1);
        assert_eq!(s.get(1, 1), Some(RED));
        assert_eq!(s.get(8, 5), Some(RED));
        assert_eq!(count(&s, RED), 8);
    }

    #[test]
    fn test_draw_line_zero_width() {
        let mut s = Surface::new(10, 10);
        s.draw_line((0, 0), (9, 9), RED, 0);
        assert_eq!(count(&s, RED), 0);
    }

    #[test]
    fn test_draw_line_far_off_surface() {
        let mut s = Surface::new(10, 10);
        s.draw_line((-1000, -1000), (-900, -2000), RED, 1);
        assert_eq!(count(&s, RED), 0);
    }

    #[test]
    fn test_closed_polyline() {
        let mut open = Surface::new(10, 10);
        let mut closed = Surface::new(10, 10);
        let points = [(1, 1), (8, 1), (8, 8)];
        open.draw_polyline(&points, false, RED, 1);
        closed.draw_polyline(&points, true, RED, 1);
        assert!(count(&closed, RED) > count(&open, RED));
        assert_eq!(open.get(4, 4), Some(Rgba::TRANSPARENT));
        assert_eq!(closed.get(4, 4), Some(RED));
    }

    #[test]
    fn test_fill_polygon_square() {
        let mut s = Surface::new(10, 10);
        s.fill_polygon(&[(2.0, 2.0), (6.0, 2.0), (6.0, 6.0), (2.0, 6.0)], RED);
        assert_eq!(count(&s, RED), 16);
        assert_eq!(s.get(2, 2), Some(RED));
        assert_eq!(s.get(6, 6), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_fill_polygon_covers_surface() {
        let mut s = Surface::new(10, 10);
        s.fill_polygon(&[(5.0, 5.0), (100.0, 5.0), (5.0, -100.0)], RED);
        assert_eq!(s.get(9, 0), Some(RED));
        assert_eq!(s.get(0, 9), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_blit_multiply_masks() {
        let mut s = Surface::filled(4, 4, RED);
        let mut mask = Surface::new(4, 4);
        mask.fill_rect(PixelRect::new(0, 0, 2, 4), Rgba::WHITE);
        s.blit_multiply(&mask, 0, 0);
        assert_eq!(s.get(0, 0), Some(RED));
        assert_eq!(s.get(3, 3), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_blit_offset_clips() {
        let mut s = Surface::new(4, 4);
        let src = Surface::filled(4, 4, RED);
        s.blit(&src, 2, -2);
        assert_eq!(count(&s, RED), 4);
        assert_eq!(s.get(3, 1), Some(RED));
        assert_eq!(s.get(1, 1), Some(Rgba::TRANSPARENT));
    }

    proptest! {
        #[test]
        fn prop_fill_rect_clips(x in -50i32..50, y in -50i32..50, w in -20i32..80, h in -20i32..80) {
            let mut s = Surface::new(16, 12);
            let rect = PixelRect::new(x, y, w, h);
            s.fill_rect(rect, RED);
            let expected = rect.intersection(&s.rect()).map_or(0, |r| (r.width * r.height) as usize);
            prop_assert_eq!(count(&s, RED), expected);
        }

        #[test]
        fn prop_line_covers_endpoints(x0 in -100i32..100, y0 in -100i32..100, x1 in 0i32..16, y1 in 0i32..12) {
            let mut s = Surface::new(16, 12);
            s.draw_line((x0, y0), (x1, y1), RED, 1);
            prop_assert_eq!(s.get(x1, y1), Some(RED));
            prop_assert_eq!(s.pixels().len(), 16 * 12);
        }
    }
}
