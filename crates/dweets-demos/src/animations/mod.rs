//! The demo animations.

pub mod black_hole;
pub mod lorenz;
pub mod ring_weave;
pub mod shatter;
pub mod tunnel;
