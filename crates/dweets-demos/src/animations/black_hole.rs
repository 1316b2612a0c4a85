//! Mini black hole: stars spiralling into a pseudo-3D vortex.

use dweets_core::{
    Animated, Canvas, CtrlAction, Flow, FrameStats, Input, Key, KeyboardState, PixelRect, Rgba,
    Tunable, adjust_held,
};
use ratatui::text::Line;

use crate::hud;

const VOFFSET: usize = 0;
const DEEPNESS: usize = 1;
const STAR_SCALE: usize = 2;
const SPEED_UP: usize = 3;
const NSTARS: usize = 4;

/// A single star for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub color: Rgba,
}

impl Star {
    /// Pixel rect of the star, truncated toward zero.
    pub fn rect(&self) -> PixelRect {
        PixelRect::from_f64(self.x, self.y, self.size, self.size)
    }
}

/// Color of star `i`: red saturates first, then green, then blue.
pub fn star_color(i: u32) -> Rgba {
    let channel = |v: u64| v.min(255) as u8;
    let i = i as u64;
    Rgba::rgb(channel(99 * i), channel(2 * i), channel(i))
}

/// The black hole demo.
#[derive(Debug, Clone)]
pub struct BlackHole {
    center: (f64, f64),
    params: [Tunable; 5],
    time: f64,
    /// Seconds from the latest tick, added once the next frame starts.
    pending: f64,
    show_info: bool,
}

impl BlackHole {
    pub fn new(nstars: u32, (width, height): (u32, u32)) -> Self {
        let star_scale = (height as f64 * 0.005).trunc();
        Self {
            center: (width as f64 / 2.0, height as f64 / 2.0),
            params: [
                Tunable::new(Key::Char('h'), "voffset", 0.1, 0.005),
                Tunable::new(Key::Char('d'), "deepness", 2e4, 100.0),
                Tunable::new(Key::Char('j'), "star_scale", star_scale, 0.1),
                Tunable::new(Key::Char('s'), "speed_up", 260.0, 1.0),
                Tunable::new(Key::Char('n'), "nstars", nstars as f64, 1.0),
            ],
            time: 0.0,
            pending: 0.0,
            show_info: true,
        }
    }

    pub fn voffset(&self) -> f64 {
        self.params[VOFFSET].value()
    }

    pub fn deepness(&self) -> f64 {
        self.params[DEEPNESS].value()
    }

    pub fn star_scale(&self) -> f64 {
        self.params[STAR_SCALE].value()
    }

    pub fn speed_up(&self) -> f64 {
        self.params[SPEED_UP].value()
    }

    pub fn nstars(&self) -> u32 {
        self.params[NSTARS].value().round().max(0.0) as u32
    }

    /// Seconds of animation so far.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Position, size and color of star `i` at `time`.
    pub fn star(&self, i: u32, time: f64) -> Star {
        let (cx, cy) = self.center;
        let fi = i as f64;
        let angle = self.speed_up() * time / fi + fi.powi(3).sin();
        Star {
            x: cx + fi * angle.sin(),
            y: cy + self.voffset() * (2.0 * fi * angle.cos() + self.deepness() / fi),
            size: fi.sin() * self.star_scale(),
            color: star_color(i),
        }
    }

    /// Every star of the current frame, in index order.
    pub fn stars(&self) -> impl Iterator<Item = Star> + '_ {
        (1..self.nstars()).map(|i| self.star(i, self.time))
    }
}

impl Animated for BlackHole {
    fn handle(&mut self, input: &Input) -> Flow {
        match input {
            Input::Quit => Flow::Quit,
            Input::KeyDown(press) => match press.key {
                Key::Escape => Flow::Quit,
                Key::Tab => {
                    self.show_info = !self.show_info;
                    Flow::Continue
                }
                _ => Flow::Continue,
            },
        }
    }

    fn update(&mut self, elapsed_ms: u64, keys: &KeyboardState) {
        adjust_held(&mut self.params, keys, CtrlAction::Ignore);
        // The first frame draws at time zero.
        self.time += self.pending;
        self.pending = elapsed_ms as f64 / 1000.0;
    }

    fn draw(&mut self, canvas: &mut Canvas<'_>, _stats: &FrameStats) {
        let space = canvas.rect();
        for star in self.stars() {
            let rect = star.rect();
            if space.intersects(&rect) {
                canvas.fill_rect(rect, star.color);
            }
        }
    }

    fn info(&self, stats: &FrameStats) -> Vec<Line<'static>> {
        if !self.show_info {
            return Vec::new();
        }
        hud::table(&[
            ("time", format!("{:.2}", self.time)),
            ("fps", format!("{:.2}", stats.fps)),
            ("nstars", format!("{}", self.nstars())),
            ("voffset", format!("{:.2}", self.voffset())),
            ("deepness", format!("{}", self.deepness())),
            ("star_scale", format!("{:.2}", self.star_scale())),
            ("speed_up", format!("{:.2}", self.speed_up())),
        ])
    }
}

#[cfg(test)]
mod tests {
    use dweets_core::{KeyPress, Modifiers};
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn prop_color_channels_in_range(i in 1u32..) {
            let c = star_color(i);
            prop_assert_eq!(c.a, 255);
            prop_assert_eq!(c.b as u64, (i as u64).min(255));
            prop_assert!(c.r >= c.g && c.g >= c.b);
        }
    }

    #[test]
    fn test_star_color_saturation() {
        assert_eq!(star_color(1), Rgba::rgb(99, 2, 1));
        assert_eq!(star_color(3), Rgba::rgb(255, 6, 3));
        assert_eq!(star_color(200), Rgba::rgb(255, 255, 200));
        assert_eq!(star_color(u32::MAX), Rgba::rgb(255, 255, 255));
    }

    #[test]
    fn test_first_star_at_time_zero() {
        let hole = BlackHole::new(2000, (800, 600));
        let star = hole.star(1, 0.0);
        let angle = 1.0_f64.sin();
        let expected_y = 300.0 + 0.1 * (2.0 * angle.cos() + 2e4);
        assert!((star.x - (400.0 + angle.sin())).abs() < 1e-9);
        assert!((star.y - expected_y).abs() < 1e-9);
        assert!((star.size - 1.0_f64.sin() * 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_star_count() {
        let hole = BlackHole::new(2000, (800, 600));
        assert_eq!(hole.stars().count(), 1999);
        assert_eq!(BlackHole::new(1, (800, 600)).stars().count(), 0);
    }

    #[test]
    fn test_offscreen_stars_are_culled() {
        let hole = BlackHole::new(2000, (800, 600));
        let space = PixelRect::new(0, 0, 800, 600);
        let visible = hole.stars().filter(|s| space.intersects(&s.rect())).count();
        assert!(visible > 0);
        assert!(visible < 1999);
    }

    #[test]
    fn test_held_keys_adjust_once_per_frame() {
        let mut hole = BlackHole::new(2000, (800, 600));
        let mut keys = KeyboardState::with_releases();
        keys.press(KeyPress::new(Key::Char('n'), Modifiers::NONE));
        hole.update(0, &keys);
        hole.update(0, &keys);
        assert_eq!(hole.nstars(), 2002);

        keys.press(KeyPress::new(Key::Char('s'), Modifiers::SHIFT));
        hole.update(0, &keys);
        assert_eq!(hole.nstars(), 2001);
        assert_eq!(hole.speed_up(), 259.0);
    }

    #[test]
    fn test_time_accumulates() {
        let mut hole = BlackHole::new(10, (800, 600));
        let keys = KeyboardState::default();
        hole.update(500, &keys);
        hole.update(250, &keys);
        assert!((hole.time() - 0.5).abs() < 1e-12);
        hole.update(16, &keys);
        assert!((hole.time() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_first_frame_draws_at_time_zero() {
        let mut hole = BlackHole::new(10, (800, 600));
        hole.update(16, &KeyboardState::default());
        assert_eq!(hole.time(), 0.0);
        let first = hole.stars().next();
        assert_eq!(first, Some(hole.star(1, 0.0)));
    }

    #[test]
    fn test_tab_toggles_info() {
        let mut hole = BlackHole::new(10, (800, 600));
        let stats = FrameStats::default();
        assert_eq!(hole.info(&stats).len(), 7);
        hole.handle(&Input::KeyDown(KeyPress::new(Key::Tab, Modifiers::NONE)));
        assert!(hole.info(&stats).is_empty());
    }
}
