//! Collision System
//!
//! Arcade-style AABB physics: dynamic bodies fall under gravity and collide
//! with static platforms and the world bounds. Axes are resolved one after
//! the other (x first, then y) so a body sliding along a platform top never
//! snags on it.
//!
//! Horizontal velocity is never written here. Side contacts and world-bound
//! clamps move the body back but leave the velocity as the controller set it.

use macroquad::math::{Rect, Vec2};

use super::components::{rects_overlap, tuning, Body, Touching};
use super::world::WorldState;

/// Vertical velocity after bouncing off a surface
fn rebound(vy: f32, bounce: f32) -> f32 {
    let v = -vy * bounce;
    if v.abs() < tuning::REST_SPEED {
        0.0
    } else {
        v
    }
}

/// Integrate one body for `delta_time` seconds and resolve its contacts.
///
/// `touching` and `blocked` are recomputed from scratch, so they only ever
/// describe contacts made during this step.
pub fn move_and_collide(
    body: &mut Body,
    statics: &[Body],
    bounds: Rect,
    gravity: f32,
    delta_time: f32,
) {
    body.touching = Touching::default();
    body.blocked = Touching::default();

    if body.allow_gravity {
        body.velocity.y += gravity * delta_time;
    }

    // X axis
    body.position.x += body.velocity.x * delta_time;
    if body.velocity.x != 0.0 {
        for solid in statics {
            let s = solid.rect();
            if !rects_overlap(&body.rect(), &s) {
                continue;
            }
            let half = body.half_size().x;
            if body.velocity.x > 0.0 {
                body.position.x = s.x - half;
                body.touching.right = true;
            } else {
                body.position.x = s.x + s.w + half;
                body.touching.left = true;
            }
        }
    }

    // Y axis
    body.position.y += body.velocity.y * delta_time;
    for solid in statics {
        let s = solid.rect();
        if !rects_overlap(&body.rect(), &s) {
            continue;
        }
        let half = body.half_size().y;
        if body.velocity.y > 0.0 {
            body.position.y = s.y - half;
            body.touching.down = true;
            body.velocity.y = rebound(body.velocity.y, body.bounce);
        } else if body.velocity.y < 0.0 {
            body.position.y = s.y + s.h + half;
            body.touching.up = true;
            body.velocity.y = rebound(body.velocity.y, body.bounce);
        }
    }

    if body.collide_world_bounds {
        clamp_to_bounds(body, bounds);
    }
}

fn clamp_to_bounds(body: &mut Body, bounds: Rect) {
    let half = body.half_size();

    if body.position.x - half.x < bounds.x {
        body.position.x = bounds.x + half.x;
        body.blocked.left = true;
    } else if body.position.x + half.x > bounds.x + bounds.w {
        body.position.x = bounds.x + bounds.w - half.x;
        body.blocked.right = true;
    }

    if body.position.y - half.y < bounds.y {
        body.position.y = bounds.y + half.y;
        body.blocked.up = true;
        if body.velocity.y < 0.0 {
            body.velocity.y = rebound(body.velocity.y, body.bounce);
        }
    } else if body.position.y + half.y > bounds.y + bounds.h {
        body.position.y = bounds.y + bounds.h - half.y;
        body.blocked.down = true;
        if body.velocity.y > 0.0 {
            body.velocity.y = rebound(body.velocity.y, body.bounce);
        }
    }
}

/// Step every dynamic body in the world
pub fn step(world: &mut WorldState, delta_time: f32) {
    let statics: Vec<Body> = world.platforms.iter().map(|p| p.body).collect();

    move_and_collide(&mut world.player.body, &statics, world.bounds, world.gravity, delta_time);
    for enemy in &mut world.enemies {
        move_and_collide(&mut enemy.body, &statics, world.bounds, world.gravity, delta_time);
    }
}

/// Indices of alive enemies whose bodies overlap the player's
pub fn player_enemy_overlaps(world: &WorldState) -> Vec<usize> {
    world
        .alive_enemies()
        .filter(|(_, enemy)| enemy.body.overlaps(&world.player.body))
        .map(|(idx, _)| idx)
        .collect()
}

/// Centre of a body's bottom edge, used for event positions
pub fn feet(body: &Body) -> Vec2 {
    Vec2::new(body.position.x, body.position.y + body.half_size().y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn floor() -> Body {
        let mut b = Body::new(Vec2::new(200.0, 500.0), Vec2::new(400.0, 32.0));
        b.allow_gravity = false;
        b
    }

    fn world_rect() -> Rect {
        Rect::new(0.0, 0.0, 800.0, 600.0)
    }

    #[test]
    fn test_falling_body_lands_on_platform() {
        let statics = [floor()];
        let mut body = Body::new(Vec2::new(100.0, 400.0), Vec2::new(32.0, 48.0)).with_bounce(0.2);

        let mut landed = false;
        for _ in 0..300 {
            move_and_collide(&mut body, &statics, world_rect(), 300.0, DT);
            if body.touching.down {
                landed = true;
                break;
            }
        }

        assert!(landed);
        // Bottom edge sits on the platform top (484)
        assert!((body.position.y + 24.0 - 484.0).abs() < 1e-3);
        assert!(body.velocity.y <= 0.0);
    }

    #[test]
    fn test_resting_body_keeps_touching_down() {
        let statics = [floor()];
        let mut body = Body::new(Vec2::new(100.0, 460.0), Vec2::new(32.0, 48.0)).with_bounce(0.2);

        for _ in 0..10 {
            move_and_collide(&mut body, &statics, world_rect(), 300.0, DT);
            assert!(body.touching.down);
            assert_eq!(body.velocity.y, 0.0);
        }
    }

    #[test]
    fn test_world_bounds_block_without_touching() {
        let mut body = Body::new(Vec2::new(20.0, 300.0), Vec2::new(32.0, 48.0)).with_world_bounds(true);
        body.allow_gravity = false;
        body.velocity.x = -100.0;

        move_and_collide(&mut body, &[], world_rect(), 300.0, 0.1);

        assert_eq!(body.position.x, 16.0);
        assert!(body.blocked.left);
        assert_eq!(body.touching, Touching::default());
        // Horizontal velocity is left alone
        assert_eq!(body.velocity.x, -100.0);
    }

    #[test]
    fn test_world_floor_sets_blocked_down() {
        let mut body = Body::new(Vec2::new(400.0, 570.0), Vec2::new(32.0, 48.0)).with_world_bounds(true);
        body.velocity.y = 200.0;

        move_and_collide(&mut body, &[], world_rect(), 300.0, 0.1);

        assert!(body.blocked.down);
        assert!(!body.touching.down);
        assert_eq!(body.position.y, 576.0);
    }

    #[test]
    fn test_side_contact_keeps_velocity() {
        let statics = [floor()];
        // Overlaps the platform's right end vertically, moving left into it
        let mut body = Body::new(Vec2::new(420.0, 500.0), Vec2::new(32.0, 48.0));
        body.allow_gravity = false;
        body.velocity.x = -100.0;

        move_and_collide(&mut body, &statics, world_rect(), 300.0, 0.1);

        assert!(body.touching.left);
        assert_eq!(body.position.x, 416.0);
        assert_eq!(body.velocity.x, -100.0);
    }

    #[test]
    fn test_head_bump_bounces_down() {
        let statics = [floor()];
        let mut body = Body::new(Vec2::new(100.0, 545.0), Vec2::new(32.0, 48.0)).with_bounce(0.2);
        body.allow_gravity = false;
        body.velocity.y = -330.0;

        move_and_collide(&mut body, &statics, world_rect(), 300.0, 0.1);

        assert!(body.touching.up);
        assert_eq!(body.position.y, 516.0 + 24.0);
        assert!((body.velocity.y - 66.0).abs() < 1e-3);
    }
}
