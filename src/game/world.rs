//! Game World
//!
//! `WorldState` owns everything the frame phase touches: the parallax
//! layers, the static platforms, the player, the enemies, the registered
//! animation clips and the input bindings. It is built once by `setup` and
//! then only mutated by `runtime::tick`.

use macroquad::math::{Rect, Vec2};

use super::animation::{AnimationClip, AnimationLibrary, Animator, Repeat};
use super::components::{tuning, Body, EnemyCondition, Facing};
use crate::asset::ResourceSet;
use crate::config::{GameConfig, PatrolRule};
use crate::error::Result;
use crate::input::InputBindings;

/// Clip keys. Each clip is keyed to the sheet with the same id.
pub mod clips {
    pub const PLAYER_WALK: &str = "player_walk";
    pub const PLAYER_JUMP: &str = "player_jump";
    pub const PLAYER_IDLE: &str = "player_idle";
    pub const PLAYER_HURT: &str = "player_hurt";
    pub const PLAYER_DEAD: &str = "player_dead";
    pub const PLAYER_ATTACK: &str = "player_attack";
    pub const ENEMY_WALK: &str = "enemy_walk";
    pub const ENEMY_ATTACK: &str = "enemy_attack";
    pub const ENEMY_IDLE: &str = "enemy_idle";
    pub const ENEMY_HURT: &str = "enemy_hurt";
    pub const ENEMY_DEAD: &str = "enemy_dead";
}

/// Resource ids that aren't animation sheets
pub mod images {
    /// Optional backdrop behind the parallax layers
    pub const SKY: &str = "sky";
    pub const GROUND: &str = "ground";
    pub const BACKGROUND_FAR: &str = "background_far";
    pub const BACKGROUND_NEAR: &str = "background_near";
}

/// A background tile that scrolls independently of the entities
#[derive(Debug, Clone, PartialEq)]
pub struct ParallaxLayer {
    pub texture: String,
    /// Screen-space area the layer covers
    pub area: Rect,
    /// Horizontal texture offset, wraps when drawn
    pub tile_offset_x: f32,
    /// Offset change per frame while the player moves
    pub scroll_speed: f32,
}

impl ParallaxLayer {
    pub fn new(texture: &str, area: Rect, scroll_speed: f32) -> Self {
        Self { texture: texture.to_string(), area, tile_offset_x: 0.0, scroll_speed }
    }
}

/// Static collision geometry
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    pub texture: String,
    pub body: Body,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub facing: Facing,
    pub animator: Animator,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub body: Body,
    pub facing: Facing,
    pub animator: Animator,
    pub condition: EnemyCondition,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.condition == EnemyCondition::Alive
    }
}

pub struct WorldState {
    /// World bounds, same as the canvas
    pub bounds: Rect,
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    pub patrol: PatrolRule,
    pub background_far: ParallaxLayer,
    pub background_near: ParallaxLayer,
    pub platforms: Vec<Platform>,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub animations: AnimationLibrary,
    pub bindings: InputBindings,
}

impl WorldState {
    /// Enemies that can still be struck
    pub fn alive_enemies(&self) -> impl Iterator<Item = (usize, &Enemy)> {
        self.enemies.iter().enumerate().filter(|(_, e)| e.is_alive())
    }
}

/// Setup phase: build the world from loaded resources.
///
/// Steps run in order since later ones reference earlier ones. Any resource
/// missing from `resources` fails the whole setup.
pub fn setup(resources: &ResourceSet, config: &GameConfig) -> Result<WorldState> {
    let bounds = Rect::new(0.0, 0.0, config.width as f32, config.height as f32);

    // 1. Parallax layers
    resources.require(images::BACKGROUND_FAR)?;
    resources.require(images::BACKGROUND_NEAR)?;
    let background_far = ParallaxLayer::new(images::BACKGROUND_FAR, bounds, tuning::SCROLL_SPEED_FAR);
    let background_near = ParallaxLayer::new(images::BACKGROUND_NEAR, bounds, tuning::SCROLL_SPEED_NEAR);

    // 2. Static platforms
    resources.require(images::GROUND)?;
    let (pw, ph) = config.platform_size;
    let platforms = tuning::PLATFORM_POSITIONS
        .iter()
        .map(|&(x, y)| {
            let mut body = Body::new(Vec2::new(x, y), Vec2::new(pw, ph));
            body.allow_gravity = false;
            Platform { texture: images::GROUND.to_string(), body }
        })
        .collect();

    // 3. Player
    let frame = resources.require_sheet(clips::PLAYER_IDLE)?;
    let (px, py) = tuning::PLAYER_SPAWN;
    let player = Player {
        body: Body::new(Vec2::new(px, py), Vec2::new(frame.width as f32, frame.height as f32))
            .with_bounce(tuning::BODY_BOUNCE)
            .with_world_bounds(true),
        facing: Facing::Right,
        animator: Animator::new(clips::PLAYER_IDLE),
    };

    // 4. Enemies, stepped along x
    let frame = resources.require_sheet(clips::ENEMY_IDLE)?;
    let (ex, ey) = tuning::ENEMY_SPAWN;
    let enemies = (0..tuning::ENEMY_COUNT)
        .map(|i| Enemy {
            body: Body::new(
                Vec2::new(ex + tuning::ENEMY_SPAWN_STEP * i as f32, ey),
                Vec2::new(frame.width as f32, frame.height as f32),
            )
            .with_bounce(tuning::BODY_BOUNCE)
            .with_world_bounds(true),
            facing: Facing::Right,
            animator: Animator::new(clips::ENEMY_IDLE),
            condition: EnemyCondition::Alive,
        })
        .collect();

    // 5. Animation clips
    let animations = register_clips(resources)?;

    // 6. Input
    let bindings = InputBindings::cursor_keys();

    log::info!(
        "World ready: {} platforms, {} enemies, {} clips",
        tuning::PLATFORM_POSITIONS.len(),
        tuning::ENEMY_COUNT,
        animations.len()
    );

    Ok(WorldState {
        bounds,
        gravity: config.gravity,
        patrol: config.patrol,
        background_far,
        background_near,
        platforms,
        player,
        enemies,
        animations,
        bindings,
    })
}

fn register_clips(resources: &ResourceSet) -> Result<AnimationLibrary> {
    use clips::*;

    // Sheet-tool repeat counts: -1 loops, 0 plays once
    let forever = Repeat::from_count(-1);
    let once = Repeat::from_count(0);
    let list = [
        AnimationClip::range(PLAYER_WALK, PLAYER_WALK, 0, 3, 10.0, forever),
        AnimationClip::still(PLAYER_JUMP, PLAYER_JUMP, 20.0),
        AnimationClip::still(PLAYER_IDLE, PLAYER_IDLE, 20.0),
        AnimationClip::still(PLAYER_HURT, PLAYER_HURT, 20.0),
        AnimationClip::still(PLAYER_DEAD, PLAYER_DEAD, 20.0),
        AnimationClip::range(PLAYER_ATTACK, PLAYER_ATTACK, 0, 3, 10.0, once),
        AnimationClip::range(ENEMY_WALK, ENEMY_WALK, 0, 3, 10.0, forever),
        AnimationClip::range(ENEMY_ATTACK, ENEMY_ATTACK, 0, 3, 10.0, forever),
        AnimationClip::still(ENEMY_IDLE, ENEMY_IDLE, 20.0),
        AnimationClip::still(ENEMY_HURT, ENEMY_HURT, 20.0),
        AnimationClip::still(ENEMY_DEAD, ENEMY_DEAD, 20.0),
    ];

    let mut library = AnimationLibrary::new();
    for clip in list {
        library.register(clip, resources)?;
    }
    Ok(library)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::asset::{default_manifest, load};
    use crate::error::GameError;

    /// World built from the default manifest and config
    pub(crate) fn street() -> WorldState {
        let resources = load(&default_manifest()).unwrap();
        setup(&resources, &GameConfig::default()).unwrap()
    }

    #[test]
    fn test_setup_layout() {
        let world = street();

        assert_eq!(world.bounds, Rect::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(world.gravity, 300.0);
        assert_eq!(world.platforms.len(), 2);
        assert_eq!(world.platforms[1].body.position, Vec2::new(600.0, 400.0));
        assert!(!world.platforms[0].body.allow_gravity);

        assert_eq!(world.player.body.position, Vec2::new(100.0, 450.0));
        assert_eq!(world.player.body.size, Vec2::new(32.0, 48.0));
        assert_eq!(world.player.body.bounce, 0.2);
        assert!(world.player.body.collide_world_bounds);
        assert!(world.player.animator.is_current(clips::PLAYER_IDLE));

        let xs: Vec<f32> = world.enemies.iter().map(|e| e.body.position.x).collect();
        assert_eq!(xs, vec![400.0, 600.0]);
        for enemy in &world.enemies {
            assert_eq!(enemy.body.position.y, 300.0);
            assert_eq!(enemy.body.velocity, Vec2::ZERO);
            assert!(enemy.body.allow_gravity);
            assert!(enemy.is_alive());
        }

        assert_eq!(world.background_far.scroll_speed, 0.5);
        assert_eq!(world.background_near.scroll_speed, 1.0);
    }

    #[test]
    fn test_setup_registers_all_clips() {
        let world = street();
        assert_eq!(world.animations.len(), 11);

        let attack = world.animations.get(clips::PLAYER_ATTACK).unwrap();
        assert_eq!(attack.frames, vec![0, 1, 2, 3]);
        assert_eq!(attack.repeat, Repeat::Times(0));

        let walk = world.animations.get(clips::ENEMY_WALK).unwrap();
        assert_eq!(walk.repeat, Repeat::Forever);
        let player_walk = world.animations.get(clips::PLAYER_WALK).unwrap();
        assert_eq!(player_walk.repeat, Repeat::Forever);
        assert_eq!(player_walk.frames, vec![0, 1, 2, 3]);

        let hurt = world.animations.get(clips::ENEMY_HURT).unwrap();
        assert_eq!(hurt.frames, vec![0]);
        assert_eq!(hurt.frame_rate, 20.0);
    }

    #[test]
    fn test_setup_fails_on_missing_resource() {
        let manifest: Vec<_> = default_manifest()
            .into_iter()
            .filter(|r| r.id != "enemy_hurt")
            .collect();
        let resources = load(&manifest).unwrap();

        let err = setup(&resources, &GameConfig::default()).err().unwrap();
        assert!(matches!(err, GameError::MissingResource(id) if id == "enemy_hurt"));
    }

    #[test]
    fn test_setup_uses_config_platform_size() {
        let resources = load(&default_manifest()).unwrap();
        let config = GameConfig { platform_size: (300.0, 20.0), ..GameConfig::default() };
        let world = setup(&resources, &config).unwrap();
        assert_eq!(world.platforms[0].body.size, Vec2::new(300.0, 20.0));
    }
}
