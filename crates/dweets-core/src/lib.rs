//! Core types shared by the dweets demos: surfaces and drawing, frame pacing,
//! input, tunable parameters and the [`Animated`] contract.

mod animated;
mod canvas;
mod clock;
mod color;
mod input;
mod surface;
mod tunable;

pub use animated::{Animated, Flow, FrameStats};
pub use canvas::Canvas;
pub use clock::Clock;
pub use color::{Rgba, hsl};
pub use input::{DEFAULT_HOLD, Input, Key, KeyPress, KeyboardState, Modifiers};
pub use surface::{PixelRect, Surface};
pub use tunable::{
    Binding, CooldownKey, CtrlAction, Keymap, ParamTarget, Tunable, adjust_held,
};
