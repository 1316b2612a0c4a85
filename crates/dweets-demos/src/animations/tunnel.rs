//! Shattered tunnel: a shader-like spiral of rectangles.

use std::f64::consts::TAU;

use dweets_core::{
    Animated, Canvas, CtrlAction, Flow, FrameStats, Input, Key, KeyboardState, PixelRect, Rgba,
    Tunable, adjust_held, hsl,
};
use dweets_fonts::GLYPH_HEIGHT;

const RADIUS: usize = 0;
const SIZE: usize = 1;
const LIGHTNESS: usize = 2;
const ANGLE_STEP: usize = 3;

/// Share of the original value a held key moves a constant per frame.
const NUDGE_FRACTION: f64 = 0.005;

const HUD_COLOR: Rgba = Rgba::rgb(0, 0, 200);

/// One rectangle of the tunnel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stamp {
    pub rect: PixelRect,
    pub color: Rgba,
}

/// The tunnel demo.
#[derive(Debug, Clone)]
pub struct Tunnel {
    size: (u32, u32),
    font_size: u32,
    angle: f64,
    constants: [Tunable; 4],
}

impl Tunnel {
    pub fn new(size: (u32, u32), font_size: u32) -> Self {
        Self {
            size,
            font_size,
            angle: 0.0,
            constants: [
                Tunable::proportional(Key::Char('z'), "z", 1e5, NUDGE_FRACTION),
                Tunable::proportional(Key::Char('y'), "y", 3e4, NUDGE_FRACTION),
                Tunable::proportional(Key::Char('x'), "x", 9.0, NUDGE_FRACTION),
                Tunable::proportional(Key::Char('w'), "w", 0.01, NUDGE_FRACTION),
            ],
        }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn constants(&self) -> &[Tunable] {
        &self.constants
    }

    /// Every rectangle of the current frame, outermost first.
    pub fn stamps(&self) -> Vec<Stamp> {
        let z = self.constants[RADIUS].value();
        let y_const = self.constants[SIZE].value();
        let x_const = self.constants[LIGHTNESS].value();
        let k = self.size.0 as f64 / 2.0;
        let half_height = self.size.1 as f64 / 2.0;

        let mut stamps = Vec::with_capacity(k.max(0.0) as usize);
        let mut i = k;
        while i > 0.0 {
            let j = i / k + self.angle;
            let m = k * j;
            let r = z / i;
            let x = k + j.sin() * i + m.sin() * r;
            let y = half_height + j.cos() * i + m.cos() * r;
            let size = y_const / i * (j * x_const).sin();
            stamps.push(Stamp {
                rect: PixelRect::from_f64(x, y, size, size),
                color: hsl(0.0, 99.0, lightness(i, x_const)),
            });
            i -= 1.0;
        }
        stamps
    }

    /// Info panel rows, one per constant plus the frame rate.
    pub fn hud_lines(&self, stats: &FrameStats) -> Vec<String> {
        self.constants
            .iter()
            .map(|c| format!("{}: {:.4}", c.key.name().to_uppercase(), c.value()))
            .chain(std::iter::once(format!("FPS: {:.2}", stats.fps)))
            .collect()
    }
}

/// Lightness in percent for ring `i`, wrapped into `[0, 100)`.
fn lightness(i: f64, x_const: f64) -> f64 {
    let l = (i / x_const).rem_euclid(100.0);
    if l.is_finite() { l } else { 0.0 }
}

impl Animated for Tunnel {
    fn handle(&mut self, input: &Input) -> Flow {
        match input {
            Input::Quit => Flow::Quit,
            Input::KeyDown(press) => match press.key {
                Key::Escape | Key::Char('q') => Flow::Quit,
                _ => Flow::Continue,
            },
        }
    }

    fn update(&mut self, _elapsed_ms: u64, keys: &KeyboardState) {
        adjust_held(&mut self.constants, keys, CtrlAction::Reset);
        self.angle = (self.angle + self.constants[ANGLE_STEP].value()).rem_euclid(TAU);
    }

    fn draw(&mut self, canvas: &mut Canvas<'_>, stats: &FrameStats) {
        canvas.fill(Rgba::WHITE);
        for stamp in self.stamps() {
            canvas.fill_rect(stamp.rect, stamp.color);
        }

        let cell_height = (self.font_size / GLYPH_HEIGHT as u32).max(1);
        let right = canvas.width() as i32;
        let mut top = 0;
        for line in self.hud_lines(stats) {
            let image = dweets_fonts::rasterize(&line, HUD_COLOR, cell_height);
            canvas.blit(&image, right - image.width() as i32, top);
            top += image.height() as i32;
        }
    }
}

#[cfg(test)]
mod tests {
    use dweets_core::{KeyPress, Modifiers};

    use super::*;

    fn holding(c: char, modifiers: Modifiers) -> KeyboardState {
        let mut keys = KeyboardState::with_releases();
        keys.press(KeyPress::new(Key::Char(c), modifiers));
        keys
    }

    #[test]
    fn test_stamp_count() {
        let tunnel = Tunnel::new((960, 540), 48);
        assert_eq!(tunnel.stamps().len(), 480);
        assert_eq!(Tunnel::new((1, 540), 48).stamps().len(), 1);
    }

    #[test]
    fn test_outermost_stamp() {
        let tunnel = Tunnel::new((960, 540), 48);
        let first = tunnel.stamps()[0];
        // i = k gives j = 1 and m = k.
        let r = 1e5 / 480.0;
        let x = 480.0 + 1.0_f64.sin() * 480.0 + 480.0_f64.sin() * r;
        assert_eq!(first.rect.x, x as i32);
        assert_eq!(first.color, hsl(0.0, 99.0, (480.0_f64 / 9.0).rem_euclid(100.0)));
    }

    #[test]
    fn test_angle_wraps() {
        let mut tunnel = Tunnel::new((960, 540), 48);
        let keys = KeyboardState::with_releases();
        for _ in 0..700 {
            tunnel.update(16, &keys);
        }
        assert!(tunnel.angle() >= 0.0 && tunnel.angle() < TAU);
        assert!((tunnel.angle() - (7.0_f64).rem_euclid(TAU)).abs() < 1e-6);
    }

    #[test]
    fn test_nudge_and_ctrl_reset() {
        let mut tunnel = Tunnel::new((960, 540), 48);
        for _ in 0..5 {
            tunnel.update(16, &holding('z', Modifiers::NONE));
        }
        assert!((tunnel.constants()[RADIUS].value() - 102_500.0).abs() < 1e-6);
        tunnel.update(16, &holding('z', Modifiers::SHIFT));
        assert!((tunnel.constants()[RADIUS].value() - 102_000.0).abs() < 1e-6);

        tunnel.update(16, &holding('z', Modifiers::CTRL));
        let radius = &tunnel.constants()[RADIUS];
        assert_eq!(radius.value(), radius.original());
    }

    #[test]
    fn test_lightness_wraps() {
        assert_eq!(lightness(450.0, 9.0), 50.0);
        assert_eq!(lightness(9.0, -9.0), 99.0);
        assert_eq!(lightness(1.0, 0.0), 0.0);
    }

    #[test]
    fn test_hud_lines() {
        let tunnel = Tunnel::new((960, 540), 48);
        let lines = tunnel.hud_lines(&FrameStats { fps: 59.5 });
        assert_eq!(lines[0], "Z: 100000.0000");
        assert_eq!(lines[3], "W: 0.0100");
        assert_eq!(lines[4], "FPS: 59.50");
    }

    #[test]
    fn test_quit_keys() {
        let mut tunnel = Tunnel::new((960, 540), 48);
        let q = KeyPress::new(Key::Char('q'), Modifiers::NONE);
        let space = KeyPress::new(Key::Space, Modifiers::NONE);
        assert_eq!(tunnel.handle(&Input::KeyDown(space)), Flow::Continue);
        assert_eq!(tunnel.handle(&Input::KeyDown(q)), Flow::Quit);
    }
}
