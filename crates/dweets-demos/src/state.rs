//! The closed set of demos the render loop can drive.

use dweets_core::{Animated, Canvas, Flow, FrameStats, Input, KeyboardState};
use ratatui::text::Line;

use crate::animations::{
    black_hole::BlackHole, lorenz::LorenzAttractor, ring_weave::RingWeave, shatter::BreakingBroke,
    tunnel::Tunnel,
};

/// One running demo.
#[derive(Debug)]
pub enum Demo {
    BreakingBroke(BreakingBroke),
    Lorenz(LorenzAttractor),
    BlackHole(BlackHole),
    RingWeave(RingWeave),
    Tunnel(Tunnel),
}

impl Demo {
    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Demo::BreakingBroke(_) => "Breaking Broke",
            Demo::Lorenz(_) => "Lorenz Attractor",
            Demo::BlackHole(_) => "Mini Black Hole",
            Demo::RingWeave(_) => "Ring Weave",
            Demo::Tunnel(_) => "Shattered Tunnel",
        }
    }

    fn inner(&mut self) -> &mut dyn Animated {
        match self {
            Demo::BreakingBroke(d) => d,
            Demo::Lorenz(d) => d,
            Demo::BlackHole(d) => d,
            Demo::RingWeave(d) => d,
            Demo::Tunnel(d) => d,
        }
    }
}

impl Animated for Demo {
    fn handle(&mut self, input: &Input) -> Flow {
        self.inner().handle(input)
    }

    fn update(&mut self, elapsed_ms: u64, keys: &KeyboardState) {
        self.inner().update(elapsed_ms, keys);
    }

    fn draw(&mut self, canvas: &mut Canvas<'_>, stats: &FrameStats) {
        self.inner().draw(canvas, stats);
    }

    fn info(&self, stats: &FrameStats) -> Vec<Line<'static>> {
        match self {
            Demo::BreakingBroke(d) => d.info(stats),
            Demo::Lorenz(d) => d.info(stats),
            Demo::BlackHole(d) => d.info(stats),
            Demo::RingWeave(d) => d.info(stats),
            Demo::Tunnel(d) => d.info(stats),
        }
    }
}

impl From<BreakingBroke> for Demo {
    fn from(demo: BreakingBroke) -> Self {
        Demo::BreakingBroke(demo)
    }
}

impl From<LorenzAttractor> for Demo {
    fn from(demo: LorenzAttractor) -> Self {
        Demo::Lorenz(demo)
    }
}

impl From<BlackHole> for Demo {
    fn from(demo: BlackHole) -> Self {
        Demo::BlackHole(demo)
    }
}

impl From<RingWeave> for Demo {
    fn from(demo: RingWeave) -> Self {
        Demo::RingWeave(demo)
    }
}

impl From<Tunnel> for Demo {
    fn from(demo: Tunnel) -> Self {
        Demo::Tunnel(demo)
    }
}
