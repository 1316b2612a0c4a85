//! Ring weave: a wavy ring traced by a single polyline.

use std::f64::consts::TAU;

use dweets_config::RingWeaveConfig;
use dweets_core::{
    Animated, Canvas, Flow, FrameStats, Input, Key, KeyboardState, Keymap, ParamTarget, Rgba,
};
use ratatui::text::Line;
use tracing::{debug, info};

use crate::hud;

/// Frames a parameter key stays blocked after firing.
pub const COOLDOWN: u32 = 15;

const LINE_COLOR: Rgba = Rgba::rgb(200, 200, 200);

/// A tunable ring weave parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RingParam {
    Width,
    Nsteps,
    Base,
    Spread,
    Somevar,
    Focus,
    Closed,
    Nwaves,
}

impl RingParam {
    pub fn name(self) -> &'static str {
        match self {
            RingParam::Width => "width",
            RingParam::Nsteps => "nsteps",
            RingParam::Base => "base",
            RingParam::Spread => "spread",
            RingParam::Somevar => "somevar",
            RingParam::Focus => "focus",
            RingParam::Closed => "closed",
            RingParam::Nwaves => "nwaves",
        }
    }
}

/// Shape parameters of the ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingWeaveParams {
    pub center: (f64, f64),
    pub width: i64,
    pub base: i64,
    pub closed: i64,
    /// Sharpness of the wavy region; zero makes the whole ring wavy.
    pub focus: i64,
    pub nsteps: i64,
    /// Number of waves inside the focus.
    pub nwaves: i64,
    pub somevar: i64,
    pub spread: i64,
}

impl RingWeaveParams {
    /// Fresh defaults centered on a view of the given size.
    pub fn new((width, height): (u32, u32)) -> Self {
        let base = (width.min(height) / 3) as i64;
        Self {
            center: ((width / 2) as f64, (height / 2) as f64),
            width: 1,
            base,
            closed: 0,
            focus: 9,
            nsteps: 3000,
            nwaves: 4,
            somevar: 159,
            spread: base / 8,
        }
    }

    /// Whether the polyline joins back to its start.
    pub fn is_closed(&self) -> bool {
        self.closed.rem_euclid(2) == 1
    }

    /// Sample point `index` of the ring at `time`.
    pub fn point(&self, index: i64, time: f64) -> (f64, f64) {
        let index = index as f64;
        let angle = index / self.somevar as f64 + time;
        let wave = (index / (self.nsteps as f64 / TAU) + angle * self.nwaves as f64).sin();
        let envelope = ((angle - time).sin() / 2.0 + 0.5).powf(self.focus as f64);
        let radius = self.base as f64 + self.spread as f64 * wave * envelope;
        (
            self.center.0 + angle.cos() * radius,
            self.center.1 + angle.sin() * radius,
        )
    }

    pub fn points(&self, time: f64) -> Vec<(f64, f64)> {
        (0..self.nsteps.max(0))
            .map(|index| self.point(index, time))
            .collect()
    }

    /// The persisted subset of the parameters.
    pub fn to_config(&self) -> RingWeaveConfig {
        RingWeaveConfig {
            base: self.base,
            closed: self.closed,
            focus: self.focus,
            nsteps: self.nsteps,
            nwaves: self.nwaves,
            somevar: self.somevar,
            spread: self.spread,
        }
    }

    pub fn apply_config(&mut self, config: &RingWeaveConfig) {
        self.base = config.base;
        self.closed = config.closed;
        self.focus = config.focus;
        self.nsteps = config.nsteps;
        self.nwaves = config.nwaves;
        self.somevar = config.somevar;
        self.spread = config.spread;
    }
}

impl ParamTarget<RingParam> for RingWeaveParams {
    fn get(&self, param: RingParam) -> i64 {
        match param {
            RingParam::Width => self.width,
            RingParam::Nsteps => self.nsteps,
            RingParam::Base => self.base,
            RingParam::Spread => self.spread,
            RingParam::Somevar => self.somevar,
            RingParam::Focus => self.focus,
            RingParam::Closed => self.closed,
            RingParam::Nwaves => self.nwaves,
        }
    }

    fn set(&mut self, param: RingParam, value: i64) {
        let slot = match param {
            RingParam::Width => &mut self.width,
            RingParam::Nsteps => &mut self.nsteps,
            RingParam::Base => &mut self.base,
            RingParam::Spread => &mut self.spread,
            RingParam::Somevar => &mut self.somevar,
            RingParam::Focus => &mut self.focus,
            RingParam::Closed => &mut self.closed,
            RingParam::Nwaves => &mut self.nwaves,
        };
        *slot = value;
    }
}

/// The ring weave demo.
#[derive(Debug, Clone)]
pub struct RingWeave {
    view: (u32, u32),
    params: RingWeaveParams,
    keymap: Keymap<RingParam>,
    time: f64,
}

impl RingWeave {
    pub fn new(view: (u32, u32)) -> Self {
        let keymap = Keymap::new(
            COOLDOWN,
            [
                (Key::Char('w'), RingParam::Width, 1),
                (Key::Char('n'), RingParam::Nsteps, 1),
                (Key::Char('b'), RingParam::Base, 1),
                (Key::Char('s'), RingParam::Spread, 1),
                (Key::Char('x'), RingParam::Somevar, 1),
                (Key::Char('f'), RingParam::Focus, 1),
                (Key::Char('c'), RingParam::Closed, 1),
                (Key::Char('a'), RingParam::Nwaves, 1),
            ],
        );
        Self {
            view,
            params: RingWeaveParams::new(view),
            keymap,
            time: 0.0,
        }
    }

    /// Start from persisted parameters instead of the defaults.
    pub fn with_config(view: (u32, u32), config: &RingWeaveConfig) -> Self {
        let mut weave = Self::new(view);
        weave.params.apply_config(config);
        weave
    }

    pub fn params(&self) -> &RingWeaveParams {
        &self.params
    }

    pub fn config(&self) -> RingWeaveConfig {
        self.params.to_config()
    }

    /// Default parameters for this view, as persisted values.
    pub fn default_config(view: (u32, u32)) -> RingWeaveConfig {
        RingWeaveParams::new(view).to_config()
    }

    /// Replace every parameter with fresh defaults.
    pub fn reset(&mut self) {
        self.params = RingWeaveParams::new(self.view);
        info!("ring weave parameters reset");
    }
}

impl Animated for RingWeave {
    fn handle(&mut self, input: &Input) -> Flow {
        match input {
            Input::Quit => Flow::Quit,
            Input::KeyDown(press) => match press.key {
                Key::Escape | Key::Char('q') => Flow::Quit,
                Key::Char('r') => {
                    self.reset();
                    Flow::Continue
                }
                _ => Flow::Continue,
            },
        }
    }

    fn update(&mut self, elapsed_ms: u64, keys: &KeyboardState) {
        for param in self.keymap.update(keys, &mut self.params) {
            debug!(param = param.name(), value = self.params.get(param), "parameter changed");
        }
        self.time += elapsed_ms as f64 / 1000.0;
    }

    fn draw(&mut self, canvas: &mut Canvas<'_>, _stats: &FrameStats) {
        let points = self.params.points(self.time);
        canvas.draw_polyline(&points, self.params.is_closed(), LINE_COLOR, self.params.width as i32);
    }

    fn info(&self, stats: &FrameStats) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = self
            .keymap
            .bindings()
            .iter()
            .map(|binding| {
                hud::line(format!(
                    "{}, {} +/-{}: {}",
                    binding.param.name(),
                    binding.key.key.name(),
                    binding.amount,
                    self.params.get(binding.param)
                ))
            })
            .collect();
        lines.push(hud::line(format!("fps: {:.2}", stats.fps)));
        lines
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
    fn test_defaults() {
        let params = RingWeaveParams::new((800, 600));
        assert_eq!(params.base, 200);
        assert_eq!(params.spread, 25);
        assert_eq!(params.center, (400.0, 300.0));
        assert!(!params.is_closed());
    }

    #[test]
    fn test_point_zero() {
        let params = RingWeaveParams::new((800, 600));
        // At index 0 and time 0 the wave term is sin(0) = 0.
        let (x, y) = params.point(0, 0.0);
        assert!((x - 600.0).abs() < 1e-9);
        assert!((y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_points_count() {
        let mut params = RingWeaveParams::new((800, 600));
        assert_eq!(params.points(0.0).len(), 3000);
        params.nsteps = -4;
        assert!(params.points(0.0).is_empty());
    }

    #[test]
    fn test_closed_parity() {
        let mut params = RingWeaveParams::new((800, 600));
        params.closed = 3;
        assert!(params.is_closed());
        params.closed = -1;
        assert!(params.is_closed());
        params.closed = -2;
        assert!(!params.is_closed());
    }

    #[test]
    fn test_held_key_respects_cooldown() {
        let mut weave = RingWeave::new((800, 600));
        let keys = holding('w', Modifiers::NONE);
        let mut changes = 0;
        let mut last = weave.params().width;
        for _ in 0..2 * COOLDOWN {
            weave.update(16, &keys);
            if weave.params().width != last {
                changes += 1;
                last = weave.params().width;
            }
        }
        assert!(changes <= 2);
        assert_eq!(weave.params().width, 3);
    }

    #[test]
    fn test_shift_decrements() {
        let mut weave = RingWeave::new((800, 600));
        weave.update(16, &holding('f', Modifiers::SHIFT));
        assert_eq!(weave.params().focus, 8);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut weave = RingWeave::new((800, 600));
        weave.update(16, &holding('b', Modifiers::NONE));
        assert_eq!(weave.params().base, 201);
        let flow = weave.handle(&Input::KeyDown(KeyPress::new(
            Key::Char('r'),
            Modifiers::NONE,
        )));
        assert_eq!(flow, Flow::Continue);
        assert_eq!(weave.params(), &RingWeaveParams::new((800, 600)));
    }

    #[test]
    fn test_config_round_trip() {
        let mut weave = RingWeave::new((800, 600));
        weave.update(16, &holding('a', Modifiers::NONE));
        let config = weave.config();
        let restored = RingWeave::with_config((800, 600), &config);
        assert_eq!(restored.config(), config);
        assert_eq!(restored.params().nwaves, 5);
    }

    #[test]
    fn test_info_lists_bindings() {
        let weave = RingWeave::new((800, 600));
        let lines = weave.info(&FrameStats::default());
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0].spans[0].content, "width, w +/-1: 1");
    }
}
