//! Dweet style demo animations.
//!
//! Every demo implements [`dweets_core::Animated`]. The [`Demo`] enum wraps
//! exactly one of them for the render loop:
//!
//! - Breaking Broke shatters a line of block text into wedges.
//! - The Lorenz attractor rotates with wall-clock time.
//! - The mini black hole spirals a star field into its center.
//! - Ring weave traces a tunable wavy ring.
//! - The shattered tunnel stacks rectangles into a spinning tunnel.

mod animations;
mod hud;
mod rng;
mod state;

pub use animations::black_hole::{BlackHole, Star, star_color};
pub use animations::lorenz::LorenzAttractor;
pub use animations::ring_weave::{RingParam, RingWeave, RingWeaveParams};
pub use animations::shatter::{BreakingBroke, ColorQueue, Wedges, break_image, wedge_angles};
pub use animations::tunnel::{Stamp, Tunnel};
pub use rng::{DemoRng, demo_rng};
pub use state::Demo;
