//! Lorenz attractor, integrated from scratch every frame.
//!
//! The projection rotates with wall-clock time sampled at every integration
//! step, so no two frames (or runs) trace exactly the same curve.

use chrono::Utc;
use dweets_core::{Animated, Canvas, Flow, FrameStats, Input, Key, KeyboardState, Rgba};

const LINE_COLOR: Rgba = Rgba::rgb(200, 200, 200);

/// Parameters of the Lorenz attractor plot.
#[derive(Debug, Clone, PartialEq)]
pub struct LorenzAttractor {
    /// Integration steps per frame.
    pub steps: usize,
    pub x_scale: f64,
    pub y_offset: f64,
    pub y_scale: f64,
    pub z_scale: f64,
    /// Horizontal projection scale.
    pub c_scale: f64,
    /// Vertical projection scale.
    pub d_scale: f64,
    /// Projection origin.
    pub origin: (f64, f64),
}

impl Default for LorenzAttractor {
    fn default() -> Self {
        Self {
            steps: 500,
            x_scale: 13.0,
            y_offset: 28.0,
            y_scale: 99.0,
            z_scale: 39.0,
            c_scale: 20.0,
            d_scale: 23.0,
            origin: (400.0, 900.0),
        }
    }
}

impl LorenzAttractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Integrate from (1, 1, 1) and project every step to screen space.
    ///
    /// `now` is sampled once per step and drives the projection rotation.
    pub fn trace(&self, mut now: impl FnMut() -> f64) -> Vec<(f64, f64)> {
        let (mut x, mut y, mut z) = (1.0_f64, 1.0_f64, 1.0_f64);
        let mut points = Vec::with_capacity(self.steps);
        for _ in 0..self.steps {
            let t = now();
            x += (y - x) / self.x_scale;
            y += (self.y_offset - z) * x / self.y_scale;
            z += (x * y - z) / self.z_scale;
            let c = (self.origin.0 + (x * t.cos() - y * t.sin()) * self.c_scale).trunc();
            let d = (self.origin.1 - z * self.d_scale).trunc();
            points.push((c, d));
        }
        points
    }
}

/// Wall-clock time in seconds.
fn wall_clock() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

impl Animated for LorenzAttractor {
    fn handle(&mut self, input: &Input) -> Flow {
        match input {
            Input::Quit => Flow::Quit,
            Input::KeyDown(press) => match press.key {
                Key::Escape | Key::Char('q') => Flow::Quit,
                _ => Flow::Continue,
            },
        }
    }

    fn update(&mut self, _elapsed_ms: u64, _keys: &KeyboardState) {}

    fn draw(&mut self, canvas: &mut Canvas<'_>, _stats: &FrameStats) {
        let points = self.trace(wall_clock);
        canvas.draw_polyline(&points, false, LINE_COLOR, 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_length() {
        let lorenz = LorenzAttractor::new();
        assert_eq!(lorenz.trace(|| 0.0).len(), 500);
    }

    #[test]
    fn test_first_step() {
        let lorenz = LorenzAttractor::new();
        let points = lorenz.trace(|| 0.0);
        // x stays 1, y = 1 + 27/99, z = 1 + (y - 1)/39.
        let y: f64 = 1.0 + 27.0 / 99.0;
        let z = 1.0 + (y - 1.0) / 39.0;
        assert_eq!(points[0], (420.0, (900.0 - z * 23.0).trunc()));
    }

    #[test]
    fn test_rotation_changes_projection() {
        let lorenz = LorenzAttractor::new();
        let still = lorenz.trace(|| 0.0);
        let turned = lorenz.trace(|| std::f64::consts::FRAC_PI_2);
        assert_ne!(still, turned);
        // The vertical axis does not depend on rotation.
        assert!(still.iter().zip(&turned).all(|(a, b)| a.1 == b.1));
    }

    #[test]
    fn test_q_quits() {
        use dweets_core::{KeyPress, Modifiers};
        let mut lorenz = LorenzAttractor::new();
        let press = KeyPress::new(Key::Char('q'), Modifiers::NONE);
        assert_eq!(lorenz.handle(&Input::KeyDown(press)), Flow::Quit);
        assert_eq!(lorenz.handle(&Input::Quit), Flow::Quit);
    }
}
