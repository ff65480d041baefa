//! Frame Controller
//!
//! The per-frame game logic. `run_frame` applies the sub-steps in a fixed
//! order; each reads the input snapshot and the contacts from the previous
//! physics step.
//!
//! 1. Parallax scroll
//! 2. Player horizontal movement
//! 3. Jump
//! 4. Attack
//! 5. Enemy animation
//! 6. Enemy patrol

use super::collision::feet;
use super::components::{tuning, EnemyCondition, Facing};
use super::event::{AttackEvent, EnemyEvent, FrameEvents, JumpEvent};
use super::world::{clips, WorldState};
use crate::config::PatrolRule;
use crate::input::InputSnapshot;

/// Run sub-steps 1-6 for one frame
pub fn run_frame(world: &mut WorldState, input: InputSnapshot, events: &mut FrameEvents) {
    scroll_parallax(world, input);
    move_player(world, input);
    jump(world, input, events);
    attack(world, input, events);
    animate_enemies(world);
    patrol_enemies(world);
}

/// Direction of travel, right checked first so it wins ties
fn scroll_direction(input: InputSnapshot) -> f32 {
    if input.right {
        1.0
    } else if input.left {
        -1.0
    } else {
        0.0
    }
}

pub fn scroll_parallax(world: &mut WorldState, input: InputSnapshot) {
    let dir = scroll_direction(input);
    for layer in [&mut world.background_far, &mut world.background_near] {
        layer.tile_offset_x += dir * layer.scroll_speed;
    }
}

/// The attack clip owns the player's animation until it finishes
fn attack_playing(world: &WorldState) -> bool {
    let animator = &world.player.animator;
    animator.is_current(clips::PLAYER_ATTACK) && animator.is_playing()
}

pub fn move_player(world: &mut WorldState, input: InputSnapshot) {
    let locked = attack_playing(world);
    let player = &mut world.player;

    // Right wins when both are held
    let clip = if input.right {
        player.body.velocity.x = tuning::PLAYER_RUN_SPEED;
        player.facing = Facing::Right;
        clips::PLAYER_WALK
    } else if input.left {
        player.body.velocity.x = -tuning::PLAYER_RUN_SPEED;
        player.facing = Facing::Left;
        clips::PLAYER_WALK
    } else {
        player.body.velocity.x = 0.0;
        clips::PLAYER_IDLE
    };

    if !locked {
        player.animator.play(clip, true);
    }
}

pub fn jump(world: &mut WorldState, input: InputSnapshot, events: &mut FrameEvents) {
    if !(input.up && world.player.body.touching.down) {
        return;
    }
    let locked = attack_playing(world);
    let player = &mut world.player;
    player.body.velocity.y = tuning::JUMP_VELOCITY;
    if !locked {
        player.animator.play(clips::PLAYER_JUMP, true);
    }
    events.jumps.send(JumpEvent { position: feet(&player.body) });
}

pub fn attack(world: &mut WorldState, input: InputSnapshot, events: &mut FrameEvents) {
    if !input.action || world.player.animator.is_current(clips::PLAYER_ATTACK) {
        return;
    }
    world.player.animator.play(clips::PLAYER_ATTACK, true);
    let before = events.struck.len();
    attack_overlap(world, events);
    let hits = events.struck.len() - before;
    events.attacks.send(AttackEvent { position: world.player.body.position, hits });
}

pub fn animate_enemies(world: &mut WorldState) {
    for enemy in world.enemies.iter_mut().filter(|e| e.is_alive()) {
        let vx = enemy.body.velocity.x;
        if vx != 0.0 {
            enemy.animator.play(clips::ENEMY_WALK, true);
            enemy.facing = if vx > 0.0 { Facing::Right } else { Facing::Left };
        } else {
            enemy.animator.play(clips::ENEMY_IDLE, true);
        }
    }
}

/// Next patrol velocity for a given current one
pub fn next_patrol_velocity(vx: f32, rule: PatrolRule) -> f32 {
    let speed = tuning::ENEMY_PATROL_SPEED;
    if vx == 0.0 {
        speed
    } else if vx == speed {
        -speed
    } else if rule == PatrolRule::Cycle && vx == -speed {
        speed
    } else {
        // PatrolRule::Parity: -100 has no way out
        vx
    }
}

pub fn patrol_enemies(world: &mut WorldState) {
    let rule = world.patrol;
    for enemy in world.enemies.iter_mut().filter(|e| e.is_alive()) {
        enemy.body.velocity.x = next_patrol_velocity(enemy.body.velocity.x, rule);
    }
}

// =============================================================================
// Combat
// =============================================================================

/// Whether the player's current attack lands on an enemy
fn can_strike(world: &WorldState, idx: usize) -> bool {
    let Some(enemy) = world.enemies.get(idx) else { return false };
    world.player.animator.is_current(clips::PLAYER_ATTACK)
        && enemy.is_alive()
        && enemy.body.overlaps(&world.player.body)
}

fn strike(world: &mut WorldState, idx: usize, events: &mut FrameEvents) {
    let enemy = &mut world.enemies[idx];
    enemy.condition = EnemyCondition::Hurt;
    enemy.body.velocity.x = 0.0;
    enemy.animator.play(clips::ENEMY_HURT, false);
    events.struck.send(EnemyEvent { enemy: idx, position: enemy.body.position });
}

/// Attack-overlap callback: sweep every enemy and strike those the
/// player's attack reaches
pub fn attack_overlap(world: &mut WorldState, events: &mut FrameEvents) {
    for idx in 0..world.enemies.len() {
        if can_strike(world, idx) {
            strike(world, idx, events);
        }
    }
}

/// Overlap rule handler, called once per frame for each enemy touching the
/// player
pub fn on_player_enemy_overlap(world: &mut WorldState, idx: usize, events: &mut FrameEvents) {
    if can_strike(world, idx) {
        strike(world, idx, events);
    }
}

/// Move enemies whose hurt clip has run out to `Dead`
pub fn resolve_enemy_conditions(world: &mut WorldState, events: &mut FrameEvents) {
    for (idx, enemy) in world.enemies.iter_mut().enumerate() {
        if enemy.condition == EnemyCondition::Hurt
            && enemy.animator.is_current(clips::ENEMY_HURT)
            && enemy.animator.is_finished()
        {
            enemy.condition = EnemyCondition::Dead;
            enemy.animator.play(clips::ENEMY_DEAD, false);
            events.defeated.send(EnemyEvent { enemy: idx, position: enemy.body.position });
        }
    }
}
