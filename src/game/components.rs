//! Game Components
//!
//! Plain data shared by the player and enemies. Behavior lives in the
//! controller and collision systems.

use macroquad::math::{Rect, Vec2};

/// Tuning constants for the street level
pub mod tuning {
    /// Player horizontal speed (px/s)
    pub const PLAYER_RUN_SPEED: f32 = 160.0;
    /// Vertical velocity applied on jump (negative = up)
    pub const JUMP_VELOCITY: f32 = -330.0;
    /// Enemy patrol speed (px/s)
    pub const ENEMY_PATROL_SPEED: f32 = 100.0;
    /// Restitution for player and enemy bodies
    pub const BODY_BOUNCE: f32 = 0.2;
    /// Far background scroll per frame while moving
    pub const SCROLL_SPEED_FAR: f32 = 0.5;
    /// Near background scroll per frame while moving
    pub const SCROLL_SPEED_NEAR: f32 = 1.0;
    /// Rebounds slower than this settle to rest instead of bouncing
    pub const REST_SPEED: f32 = 10.0;

    pub const PLAYER_SPAWN: (f32, f32) = (100.0, 450.0);
    pub const ENEMY_SPAWN: (f32, f32) = (400.0, 300.0);
    /// Horizontal gap between consecutive enemy spawns
    pub const ENEMY_SPAWN_STEP: f32 = 200.0;
    pub const ENEMY_COUNT: usize = 2;
    pub const PLATFORM_POSITIONS: [(f32, f32); 2] = [(200.0, 500.0), (600.0, 400.0)];
}

/// Which sides of a body made contact during the last physics step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Touching {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Axis-aligned physics body. `position` is the centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    /// Vertical restitution on landing / head bumps
    pub bounce: f32,
    pub allow_gravity: bool,
    pub collide_world_bounds: bool,
    /// Contact with static platforms
    pub touching: Touching,
    /// Contact with the world bounds
    pub blocked: Touching,
}

impl Body {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            velocity: Vec2::ZERO,
            bounce: 0.0,
            allow_gravity: true,
            collide_world_bounds: false,
            touching: Touching::default(),
            blocked: Touching::default(),
        }
    }

    pub fn with_bounce(mut self, bounce: f32) -> Self {
        self.bounce = bounce;
        self
    }

    pub fn with_world_bounds(mut self, collide: bool) -> Self {
        self.collide_world_bounds = collide;
        self
    }

    pub fn half_size(&self) -> Vec2 {
        self.size * 0.5
    }

    pub fn rect(&self) -> Rect {
        aabb(self.position, self.size)
    }

    /// Strict overlap: edges that merely touch don't count
    pub fn overlaps(&self, other: &Body) -> bool {
        rects_overlap(&self.rect(), &other.rect())
    }
}

/// Rect from a centre and a size
pub fn aabb(center: Vec2, size: Vec2) -> Rect {
    Rect::new(center.x - size.x * 0.5, center.y - size.y * 0.5, size.x, size.y)
}

pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && b.x < a.x + a.w && a.y < b.y + b.h && b.y < a.y + a.h
}

/// Horizontal sprite orientation, i.e. the sign of scale.x
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Facing {
    #[default]
    Right,
    /// Mirrored
    Left,
}

impl Facing {
    pub fn scale_x(&self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    /// Drawn flipped, i.e. negative x scale
    pub fn is_mirrored(&self) -> bool {
        self.scale_x() < 0.0
    }
}

/// Combat state of an enemy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnemyCondition {
    /// Patrolling, can be struck
    #[default]
    Alive,
    /// Struck, playing the hurt clip
    Hurt,
    /// Defeated. Stays in the world, ignored by patrol and overlap checks.
    Dead,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_rect_is_centered() {
        let body = Body::new(Vec2::new(100.0, 450.0), Vec2::new(32.0, 48.0));
        let r = body.rect();
        assert_eq!((r.x, r.y, r.w, r.h), (84.0, 426.0, 32.0, 48.0));
    }

    #[test]
    fn test_overlap_excludes_touching_edges() {
        let a = Body::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Body::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        let c = Body::new(Vec2::new(9.0, 5.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_facing_scale() {
        assert_eq!(Facing::Right.scale_x(), 1.0);
        assert_eq!(Facing::Left.scale_x(), -1.0);
        assert!(Facing::Left.is_mirrored());
        assert!(!Facing::Right.is_mirrored());
    }
}
