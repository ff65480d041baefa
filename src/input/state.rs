//! Input state management
//!
//! Polls both keyboard (macroquad) and gamepad (gilrs) input and folds them
//! into one `InputSnapshot` per frame.

use macroquad::prelude::*;

use super::gamepad::{Gamepad, PadButton};

/// Stick deflection needed to count as a direction press
const STICK_THRESHOLD: f32 = 0.5;

/// Keys bound to the four directions and the action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputBindings {
    pub left: KeyCode,
    pub right: KeyCode,
    pub up: KeyCode,
    pub down: KeyCode,
    pub action: KeyCode,
}

impl InputBindings {
    /// Cursor keys for movement, Space for the action
    pub fn cursor_keys() -> Self {
        Self {
            left: KeyCode::Left,
            right: KeyCode::Right,
            up: KeyCode::Up,
            down: KeyCode::Down,
            action: KeyCode::Space,
        }
    }
}

impl Default for InputBindings {
    fn default() -> Self {
        Self::cursor_keys()
    }
}

/// What is held this frame. Read-only to the frame phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub action: bool,
}

impl InputSnapshot {
    /// Combine two sources, a direction is held if either holds it
    pub fn merge(self, other: InputSnapshot) -> Self {
        Self {
            left: self.left || other.left,
            right: self.right || other.right,
            up: self.up || other.up,
            down: self.down || other.down,
            action: self.action || other.action,
        }
    }
}

/// Unified input state that handles both keyboard and gamepad
pub struct InputState {
    gamepad: Gamepad,
}

impl InputState {
    pub fn new() -> Self {
        Self { gamepad: Gamepad::new() }
    }

    /// Call once per frame before taking a snapshot
    pub fn poll(&mut self) {
        self.gamepad.poll();
    }

    pub fn has_gamepad(&self) -> bool {
        self.gamepad.has_gamepad()
    }

    /// Read the current frame's input
    pub fn snapshot(&self, bindings: &InputBindings) -> InputSnapshot {
        self.keyboard(bindings).merge(self.pad())
    }

    fn keyboard(&self, bindings: &InputBindings) -> InputSnapshot {
        InputSnapshot {
            left: is_key_down(bindings.left),
            right: is_key_down(bindings.right),
            up: is_key_down(bindings.up),
            down: is_key_down(bindings.down),
            action: is_key_down(bindings.action),
        }
    }

    fn pad(&self) -> InputSnapshot {
        if !self.gamepad.has_gamepad() {
            return InputSnapshot::default();
        }
        let stick = self.gamepad.left_stick();
        InputSnapshot {
            left: self.gamepad.is_button_down(PadButton::DPadLeft) || stick.x < -STICK_THRESHOLD,
            right: self.gamepad.is_button_down(PadButton::DPadRight) || stick.x > STICK_THRESHOLD,
            up: self.gamepad.is_button_down(PadButton::DPadUp) || stick.y > STICK_THRESHOLD,
            down: self.gamepad.is_button_down(PadButton::DPadDown) || stick.y < -STICK_THRESHOLD,
            action: self.gamepad.is_button_down(PadButton::South),
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_is_or() {
        let kb = InputSnapshot { left: true, ..Default::default() };
        let pad = InputSnapshot { action: true, left: false, ..Default::default() };
        let merged = kb.merge(pad);
        assert!(merged.left && merged.action);
        assert!(!merged.right && !merged.up && !merged.down);
    }

    #[test]
    fn test_cursor_bindings() {
        let b = InputBindings::cursor_keys();
        assert_eq!(b.left, KeyCode::Left);
        assert_eq!(b.action, KeyCode::Space);
        assert_eq!(InputBindings::default(), b);
    }
}
