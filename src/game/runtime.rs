//! Game Runtime
//!
//! Owns the world for the main loop and runs one frame of simulation per
//! call: controller sub-steps, physics, the player/enemy overlap rule, then
//! animation playback.

use crate::input::InputSnapshot;

use super::collision;
use super::controller;
use super::event::FrameEvents;
use super::world::WorldState;

/// Frame timing data for the debug log
#[derive(Debug, Clone, Default)]
pub struct FrameTimings {
    /// Input polling time (ms)
    pub input_ms: f32,
    /// Simulation time (ms)
    pub logic_ms: f32,
    /// Drawing time (ms)
    pub render_ms: f32,
    /// Total frame time (ms)
    pub total_ms: f32,
}

impl FrameTimings {
    /// Start timing a phase (returns time in seconds from macroquad)
    pub fn start() -> f64 {
        macroquad::prelude::get_time()
    }

    /// Get elapsed time in ms since start
    pub fn elapsed_ms(start: f64) -> f32 {
        ((macroquad::prelude::get_time() - start) * 1000.0) as f32
    }
}

/// Run one frame and return what happened during it
pub fn tick(world: &mut WorldState, input: InputSnapshot, delta_time: f32) -> FrameEvents {
    let mut events = FrameEvents::new();

    controller::run_frame(world, input, &mut events);

    collision::step(world, delta_time);

    for idx in collision::player_enemy_overlaps(world) {
        controller::on_player_enemy_overlap(world, idx, &mut events);
    }

    world.player.animator.update(delta_time, &world.animations);
    for enemy in &mut world.enemies {
        enemy.animator.update(delta_time, &world.animations);
    }
    controller::resolve_enemy_conditions(world, &mut events);

    events
}

/// Play state driven by the main loop
pub struct GameRuntime {
    pub world: WorldState,

    /// Events from the most recent tick, replaced by the next one
    pub events: FrameEvents,

    /// Frames simulated since setup
    pub frame: u64,

    pub frame_timings: FrameTimings,
}

impl GameRuntime {
    pub fn new(world: WorldState) -> Self {
        Self {
            world,
            events: FrameEvents::new(),
            frame: 0,
            frame_timings: FrameTimings::default(),
        }
    }

    pub fn tick(&mut self, input: InputSnapshot, delta_time: f32) {
        self.events = tick(&mut self.world, input, delta_time);
        self.frame += 1;
    }

    /// Write this frame's events to the log
    pub fn log_events(&self) {
        if self.events.is_empty() {
            return;
        }
        for jump in self.events.jumps.iter() {
            log::trace!("frame {}: jump from {:?}", self.frame, jump.position);
        }
        for attack in self.events.attacks.iter() {
            log::debug!("frame {}: attack at {:?} hit {}", self.frame, attack.position, attack.hits);
        }
        for hit in self.events.struck.iter() {
            log::debug!("frame {}: enemy {} struck at {:?}", self.frame, hit.enemy, hit.position);
        }
        for down in self.events.defeated.iter() {
            log::debug!("frame {}: enemy {} defeated", self.frame, down.enemy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::components::EnemyCondition;
    use crate::game::world::clips;
    use crate::game::world::tests::street;

    const DT: f32 = 1.0 / 60.0;

    fn held_action() -> InputSnapshot {
        InputSnapshot { action: true, ..Default::default() }
    }

    #[test]
    fn test_player_settles_on_platform() {
        let mut world = street();
        for _ in 0..120 {
            tick(&mut world, InputSnapshot::default(), DT);
        }
        let body = &world.player.body;
        assert!(body.touching.down);
        // Platform at y=500 with height 32: top at 484
        assert!((body.position.y + body.half_size().y - 484.0).abs() < 1e-3);
    }

    #[test]
    fn test_jump_fires_only_from_ground() {
        let mut world = street();
        for _ in 0..120 {
            tick(&mut world, InputSnapshot::default(), DT);
        }

        let up = InputSnapshot { up: true, ..Default::default() };
        let events = tick(&mut world, up, DT);
        assert_eq!(events.jumps.len(), 1);
        assert!(world.player.body.velocity.y < 0.0);

        // Still rising: holding up does nothing more
        let events = tick(&mut world, up, DT);
        assert!(events.jumps.is_empty());
    }

    #[test]
    fn test_held_attack_retriggers_after_clip() {
        let mut world = street();
        let mut attacks = 0;
        for _ in 0..20 {
            attacks += tick(&mut world, held_action(), DT).attacks.len();
        }
        assert_eq!(attacks, 1);

        // The 0.4s clip runs out around frame 25 and the held key fires again
        for _ in 0..10 {
            attacks += tick(&mut world, held_action(), DT).attacks.len();
        }
        assert_eq!(attacks, 2);
    }

    #[test]
    fn test_attack_defeats_overlapping_enemy() {
        let mut runtime = GameRuntime::new(street());
        let target = runtime.world.player.body.position;
        runtime.world.enemies[0].body.position = target;

        runtime.tick(held_action(), DT);
        assert_eq!(runtime.events.struck.len(), 1);
        assert_eq!(runtime.world.enemies[0].condition, EnemyCondition::Hurt);
        assert_eq!(runtime.world.enemies[1].condition, EnemyCondition::Alive);

        let mut defeated = 0;
        for _ in 0..10 {
            runtime.tick(InputSnapshot::default(), DT);
            defeated += runtime.events.defeated.len();
        }
        assert_eq!(defeated, 1);
        assert_eq!(runtime.world.enemies[0].condition, EnemyCondition::Dead);
        assert_eq!(runtime.world.enemies[0].body.velocity.x, 0.0);
        assert!(runtime.world.enemies[0].animator.is_current(clips::ENEMY_DEAD));
        assert_eq!(runtime.frame, 11);
    }

    #[test]
    fn test_enemies_start_patrolling() {
        let mut world = street();
        tick(&mut world, InputSnapshot::default(), DT);
        for enemy in &world.enemies {
            assert_eq!(enemy.body.velocity.x, 100.0);
            assert!(enemy.animator.is_current(clips::ENEMY_IDLE));
        }
        tick(&mut world, InputSnapshot::default(), DT);
        for enemy in &world.enemies {
            assert!(enemy.animator.is_current(clips::ENEMY_WALK));
        }
    }

    #[test]
    fn test_runtime_matches_free_tick() {
        let mut runtime = GameRuntime::new(street());
        let mut world = street();
        runtime.world.enemies[0].body.position = runtime.world.player.body.position;
        world.enemies[0].body.position = world.player.body.position;

        let inputs = [held_action(), InputSnapshot { right: true, ..Default::default() }, InputSnapshot::default()];
        for input in inputs.iter().cycle().take(30) {
            runtime.tick(*input, DT);
            let events = tick(&mut world, *input, DT);

            assert_eq!(runtime.events.attacks.len(), events.attacks.len());
            assert_eq!(runtime.events.struck.len(), events.struck.len());
            assert_eq!(runtime.events.defeated.len(), events.defeated.len());
            assert_eq!(runtime.world.player.body, world.player.body);
            assert_eq!(runtime.world.enemies[0].condition, world.enemies[0].condition);
        }
        assert_eq!(runtime.frame, 30);
    }

    #[test]
    fn test_events_cleared_each_tick() {
        let mut runtime = GameRuntime::new(street());
        runtime.tick(held_action(), DT);
        assert_eq!(runtime.events.attacks.len(), 1);
        runtime.tick(held_action(), DT);
        assert!(runtime.events.attacks.is_empty());
    }
}
