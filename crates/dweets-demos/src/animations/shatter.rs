//! Breaking Broke: text shattered into randomly offset angular wedges.

use std::collections::VecDeque;

use dweets_core::{
    Animated, Canvas, Flow, FrameStats, Input, Key, KeyboardState, PixelRect, Rgba, Surface,
};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::rng::DemoRng;

/// Smallest wedge, in degrees.
pub const ARC_MIN: u32 = 5;
/// Upper bound (exclusive) of a wedge, in degrees.
pub const ARC_MAX: u32 = 20;
/// Default maximum per-axis offset of a wedge.
pub const SHAKE: i32 = 5;

const TEXT: &str = "BROKEN";
const TEXT_CELL_HEIGHT: u32 = 20;
const OUTLINE: Rgba = Rgba::rgb(200, 10, 10);

/// Lazily splits the full circle into contiguous wedges.
///
/// Each wedge ends a random whole number of degrees in
/// `[start + arc_min, start + arc_max)` past its start, clamped to 360. The
/// sequence is finished once a wedge ends at exactly 360.
#[derive(Debug, Clone)]
pub struct Wedges {
    start: u32,
    arc_min: u32,
    arc_max: u32,
    done: bool,
}

impl Wedges {
    pub fn new(arc_min: u32, arc_max: u32) -> Self {
        let arc_min = arc_min.max(1);
        Self {
            start: 0,
            arc_min,
            arc_max: arc_max.max(arc_min + 1),
            done: false,
        }
    }

    /// The next `(start, end)` wedge in degrees, drawing from `rng`.
    pub fn next_wedge<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<(u32, u32)> {
        if self.done {
            return None;
        }
        let end = rng
            .random_range(self.start + self.arc_min..self.start + self.arc_max)
            .min(360);
        let wedge = (self.start, end);
        self.start = end;
        self.done = end == 360;
        Some(wedge)
    }
}

/// Iterate over the wedges of a full circle.
pub fn wedge_angles<R: Rng + ?Sized>(
    rng: &mut R,
    arc_min: u32,
    arc_max: u32,
) -> impl Iterator<Item = (u32, u32)> + '_ {
    let mut wedges = Wedges::new(arc_min, arc_max);
    std::iter::from_fn(move || wedges.next_wedge(rng))
}

/// A mask covering the wedge between two angles, spanning from the image
/// center past every edge of the image.
pub fn wedge_mask((width, height): (u32, u32), start: u32, end: u32) -> Surface {
    let length = width.max(height) as f64 * 2.0;
    let cx = (width / 2) as f64;
    let cy = (height / 2) as f64;
    let ray = |degrees: u32| {
        let radians = (degrees as f64).to_radians();
        (cx + radians.cos() * length, cy - radians.sin() * length)
    };

    let mut mask = Surface::new(width, height);
    mask.fill_polygon(&[(cx, cy), ray(start), ray(end)], Rgba::WHITE);
    mask
}

/// Return a "broken" copy of `source`: every wedge of the image is shifted by
/// its own random offset of at most `shake` pixels per axis.
pub fn break_image<R: Rng + ?Sized>(source: &Surface, shake: i32, rng: &mut R) -> Surface {
    let size = source.size();
    let shake = shake.abs();
    let mut result = Surface::new(size.0, size.1);
    let mut wedges = Wedges::new(ARC_MIN, ARC_MAX);

    while let Some((start, end)) = wedges.next_wedge(rng) {
        let mask = wedge_mask(size, start, end);
        let dx = rng.random_range(-shake..=shake);
        let dy = rng.random_range(-shake..=shake);

        let mut piece = Surface::new(size.0, size.1);
        piece.blit(source, dx, dy);
        piece.blit_multiply(&mask, 0, 0);
        result.blit(&piece, 0, 0);
    }
    result
}

/// All orderings of the channels of `rgb`, repeats included.
pub fn permutations((a, b, c): (u8, u8, u8)) -> [Rgba; 6] {
    [
        Rgba::rgb(a, b, c),
        Rgba::rgb(a, c, b),
        Rgba::rgb(b, a, c),
        Rgba::rgb(b, c, a),
        Rgba::rgb(c, a, b),
        Rgba::rgb(c, b, a),
    ]
}

/// A shuffled queue of colors that reshuffles once exhausted.
#[derive(Debug, Clone)]
pub struct ColorQueue {
    colors: Vec<Rgba>,
    queue: VecDeque<Rgba>,
}

impl ColorQueue {
    pub fn new<R: Rng + ?Sized>(colors: Vec<Rgba>, rng: &mut R) -> Self {
        let mut queue = Self {
            colors,
            queue: VecDeque::new(),
        };
        queue.shuffle(rng);
        queue
    }

    fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.colors.shuffle(rng);
        self.queue = self.colors.iter().copied().collect();
    }

    /// Colors left before the next reshuffle.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn next_color<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Rgba {
        if self.queue.is_empty() {
            self.shuffle(rng);
        }
        self.queue.pop_front().unwrap_or(Rgba::WHITE)
    }
}

/// The Breaking Broke demo.
#[derive(Debug)]
pub struct BreakingBroke {
    rng: DemoRng,
    colors: ColorQueue,
    text: Surface,
    broken: Surface,
}

impl BreakingBroke {
    pub fn new(mut rng: DemoRng) -> Self {
        let palette = permutations((10, 10, 200))
            .into_iter()
            .chain(permutations((10, 200, 200)))
            .collect();
        let colors = ColorQueue::new(palette, &mut rng);
        let mut demo = Self {
            rng,
            colors,
            text: Surface::new(0, 0),
            broken: Surface::new(0, 0),
        };
        demo.init_broken();
        demo
    }

    /// Render the text in the next color and break it.
    fn init_broken(&mut self) {
        let color = self.colors.next_color(&mut self.rng);
        self.text = dweets_fonts::rasterize(TEXT, color, TEXT_CELL_HEIGHT);
        self.broken = break_image(&self.text, SHAKE, &mut self.rng);
        debug!(?color, "text broken");
    }

    pub fn text(&self) -> &Surface {
        &self.text
    }

    pub fn broken(&self) -> &Surface {
        &self.broken
    }
}

impl Animated for BreakingBroke {
    fn handle(&mut self, input: &Input) -> Flow {
        match input {
            Input::Quit => Flow::Quit,
            Input::KeyDown(press) => match press.key {
                Key::Escape => Flow::Quit,
                Key::Space => {
                    self.init_broken();
                    Flow::Continue
                }
                _ => Flow::Continue,
            },
        }
    }

    fn update(&mut self, _elapsed_ms: u64, _keys: &KeyboardState) {}

    fn draw(&mut self, canvas: &mut Canvas<'_>, _stats: &FrameStats) {
        let (w, h) = (self.text.width() as i32, self.text.height() as i32);

        canvas.blit(&self.text, 0, 0);
        canvas.draw_rect(PixelRect::new(0, 0, w, h), OUTLINE);

        canvas.blit(&self.broken, 0, h);
        canvas.draw_rect(PixelRect::new(0, h, w, h), OUTLINE);
    }
}
