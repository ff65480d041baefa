//! Game Module
//!
//! The platformer itself: world setup, the per-frame controller, arcade
//! physics, sprite animation and drawing.
//!
//! Key concepts:
//! - WorldState: everything that changes from frame to frame
//! - Animator: per-entity clip playback over a shared AnimationLibrary
//! - FrameEvents: what happened during a tick, logged by the main loop

pub mod animation;
pub mod collision;
pub mod components;
pub mod controller;
pub mod event;
pub mod renderer;
pub mod runtime;
pub mod world;

// Re-export main types
pub use renderer::{draw_world, RenderContext};
pub use runtime::{FrameTimings, GameRuntime};
pub use world::setup;
