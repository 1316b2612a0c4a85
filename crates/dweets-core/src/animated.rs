//! The contract every demo implements.

use ratatui::text::Line;

use crate::canvas::Canvas;
use crate::input::{Input, KeyboardState};

/// What the render loop should do after an input event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Flow {
    #[default]
    Continue,
    Quit,
}

/// Per-frame statistics shown in info panels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Measured frames per second.
    pub fps: f64,
}

/// A unit of animation driven by the render loop.
///
/// Each frame the loop forwards input events to [`Animated::handle`], then
/// calls [`Animated::update`] with the elapsed time and held keys, clears the
/// canvas and calls [`Animated::draw`].
pub trait Animated {
    /// React to a discrete input event.
    fn handle(&mut self, input: &Input) -> Flow;

    /// Advance by `elapsed_ms` milliseconds.
    fn update(&mut self, elapsed_ms: u64, keys: &KeyboardState);

    /// Draw the current frame.
    fn draw(&mut self, canvas: &mut Canvas<'_>, stats: &FrameStats);

    /// Text lines shown in the top-right info panel.
    fn info(&self, _stats: &FrameStats) -> Vec<Line<'static>> {
        Vec::new()
    }
}
