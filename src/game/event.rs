//! Event System
//!
//! The frame phase records what happened during a tick as events instead of
//! acting on it directly. The main loop logs them after the tick; tests read
//! them to check what a tick did.

use macroquad::math::Vec2;

/// Events of a single type, in the order they were sent during a tick
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Iterate over events without clearing
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a single tick reports
#[derive(Debug, Default)]
pub struct FrameEvents {
    /// Player jumped this frame
    pub jumps: EventQueue<JumpEvent>,
    /// Player switched into the attack clip
    pub attacks: EventQueue<AttackEvent>,
    /// An enemy was hit by the player's attack
    pub struck: EventQueue<EnemyEvent>,
    /// An enemy finished its hurt clip and is now dead
    pub defeated: EventQueue<EnemyEvent>,
}

impl FrameEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nothing happened this tick
    pub fn is_empty(&self) -> bool {
        self.jumps.is_empty() && self.attacks.is_empty() && self.struck.is_empty() && self.defeated.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpEvent {
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackEvent {
    pub position: Vec2,
    /// Enemies hit by the initial sweep
    pub hits: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyEvent {
    /// Index into `WorldState::enemies`
    pub enemy: usize,
    pub position: Vec2,
}
