//! Gamepad support
//!
//! Native: Uses gilrs crate for cross-platform gamepad input
//! WASM: No gamepad backend yet, reports nothing connected

use macroquad::prelude::Vec2;

/// Digital buttons the game reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadButton {
    /// A / Cross
    South,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
}

// ============================================================================
// Native Implementation (gilrs)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod platform {
    use super::*;
    use gilrs::{Axis, Button, Gilrs};

    pub struct Gamepad {
        /// None when the platform has no gamepad backend
        gilrs: Option<Gilrs>,
        deadzone: f32,
    }

    impl Gamepad {
        pub fn new() -> Self {
            let gilrs = match Gilrs::new() {
                Ok(g) => Some(g),
                Err(e) => {
                    log::warn!("Gamepad support unavailable: {}", e);
                    None
                }
            };
            Self { gilrs, deadzone: 0.15 }
        }

        pub fn poll(&mut self) {
            let Some(gilrs) = self.gilrs.as_mut() else { return };
            // Process gilrs events to update internal state
            while let Some(event) = gilrs.next_event() {
                if let gilrs::EventType::Connected = event.event {
                    log::info!("Gamepad connected: {}", gilrs.gamepad(event.id).name());
                }
            }
        }

        fn active(&self) -> Option<gilrs::Gamepad<'_>> {
            self.gilrs.as_ref()?.gamepads().next().map(|(_, gp)| gp)
        }

        pub fn has_gamepad(&self) -> bool {
            self.active().is_some()
        }

        pub fn is_button_down(&self, button: PadButton) -> bool {
            let Some(gp) = self.active() else { return false };
            let button = match button {
                PadButton::South => Button::South,
                PadButton::DPadUp => Button::DPadUp,
                PadButton::DPadDown => Button::DPadDown,
                PadButton::DPadLeft => Button::DPadLeft,
                PadButton::DPadRight => Button::DPadRight,
            };
            gp.is_pressed(button)
        }

        pub fn left_stick(&self) -> Vec2 {
            let Some(gp) = self.active() else { return Vec2::ZERO };
            let x = gp.value(Axis::LeftStickX);
            let y = gp.value(Axis::LeftStickY);
            apply_deadzone(x, y, self.deadzone)
        }
    }
}

// ============================================================================
// WASM Implementation
// ============================================================================

#[cfg(target_arch = "wasm32")]
mod platform {
    use super::*;

    pub struct Gamepad;

    impl Gamepad {
        pub fn new() -> Self {
            Self
        }

        pub fn poll(&mut self) {}

        pub fn has_gamepad(&self) -> bool {
            false
        }

        pub fn is_button_down(&self, _button: PadButton) -> bool {
            false
        }

        pub fn left_stick(&self) -> Vec2 {
            Vec2::ZERO
        }
    }
}

impl Default for platform::Gamepad {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply radial deadzone with linear rescaling
pub(crate) fn apply_deadzone(x: f32, y: f32, deadzone: f32) -> Vec2 {
    let len = (x * x + y * y).sqrt();
    if len < deadzone {
        return Vec2::ZERO;
    }
    // Rescale from deadzone..1.0 to 0.0..1.0
    let scale = (len - deadzone) / (1.0 - deadzone) / len;
    Vec2::new(x * scale, y * scale)
}

pub use platform::Gamepad;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadzone_swallows_drift() {
        assert_eq!(apply_deadzone(0.05, 0.05, 0.15), Vec2::ZERO);
    }

    #[test]
    fn test_deadzone_rescales_full_tilt() {
        let v = apply_deadzone(1.0, 0.0, 0.15);
        assert!((v.x - 1.0).abs() < 1e-6);
        assert_eq!(v.y, 0.0);
    }
}
