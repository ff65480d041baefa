//! Input handling with gamepad support
//!
//! Keyboard comes from macroquad, gamepads from gilrs on native builds.
//! Both are folded into a per-frame `InputSnapshot` that the frame phase
//! reads.

mod gamepad;
mod state;

pub use state::*;
